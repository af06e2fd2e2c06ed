//! Field validation for membership applications.
//!
//! Rules run in a fixed order and fail fast: the first violated rule is the
//! error returned, regardless of how many other fields are also wrong.
//! Uniqueness against the account store is the caller's job (it needs I/O);
//! everything here is pure given the injected clock.

use super::card;
use super::errors::RegistrationError;
use super::plan::MembershipType;
use super::request::{PaymentMethod, RegistrationRequest};
use crate::domain::foundation::Timestamp;

/// Minimum password length.
const MIN_PASSWORD_LEN: usize = 6;

/// Institutional email policy: the only configurable validation input.
#[derive(Debug, Clone)]
pub struct RegistrationPolicy {
    /// Required email domain, e.g. `my.jcu.edu.au`.
    pub email_domain: String,
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self {
            email_domain: "my.jcu.edu.au".to_string(),
        }
    }
}

/// Outcome of field validation: the handful of values the rest of the flow
/// needs in normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    /// Whitespace-trimmed student id.
    pub student_id: String,
    pub membership_type: MembershipType,
    pub payment_method: PaymentMethod,
}

/// Runs the registration field rules in order.
///
/// 1. required fields present
/// 2. password length
/// 3. institutional email
/// 4. student id shape
/// 5. membership type known
/// 6. card fields, when paying by credit card
pub fn validate_fields(
    request: &RegistrationRequest,
    policy: &RegistrationPolicy,
    now: Timestamp,
) -> Result<ValidatedFields, RegistrationError> {
    let required = [
        ("email", &request.email),
        ("password", &request.password),
        ("firstName", &request.first_name),
        ("lastName", &request.last_name),
        ("studentId", &request.student_id),
        ("membershipType", &request.membership_type),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(RegistrationError::missing_field(name));
        }
    }
    let payment_method = request
        .payment_method
        .ok_or(RegistrationError::missing_field("paymentMethod"))?;

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(RegistrationError::WeakPassword);
    }

    if !email_matches_domain(&request.email, &policy.email_domain) {
        return Err(RegistrationError::InvalidEmailDomain);
    }

    let student_id = request.student_id.trim().to_string();
    if !student_id_is_valid(&student_id) {
        return Err(RegistrationError::InvalidStudentId);
    }

    let membership_type = MembershipType::parse(&request.membership_type)
        .ok_or_else(|| RegistrationError::unknown_membership_type(&request.membership_type))?;

    if payment_method == PaymentMethod::CreditCard {
        validate_card_fields(request, now)?;
    }

    Ok(ValidatedFields {
        student_id,
        membership_type,
        payment_method,
    })
}

fn validate_card_fields(
    request: &RegistrationRequest,
    now: Timestamp,
) -> Result<(), RegistrationError> {
    let (number, expiry, cvv) = match (
        non_empty(request.card_number.as_deref()),
        non_empty(request.card_expiry.as_deref()),
        non_empty(request.card_cvv.as_deref()),
    ) {
        (Some(n), Some(e), Some(c)) => (n, e, c),
        _ => return Err(RegistrationError::MissingPaymentFields),
    };

    card::validate_card_number(number)?;
    card::validate_expiry(expiry, now)?;
    card::validate_cvv(cvv)?;
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// `local-part@<domain>` where the local part is non-empty and limited to
/// `[A-Za-z0-9._%+-]`.
fn email_matches_domain(email: &str, domain: &str) -> bool {
    let Some((local, actual_domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || actual_domain != domain {
        return false;
    }
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
}

/// 6-10 ASCII digits, nothing else.
fn student_id_is_valid(student_id: &str) -> bool {
    (6..=10).contains(&student_id.len()) && student_id.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::parse_rfc3339("2026-08-23T00:00:00Z").unwrap()
    }

    fn valid_request() -> RegistrationRequest {
        RegistrationRequest {
            email: "abc@my.jcu.edu.au".to_string(),
            password: "secret1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            student_id: "14742770".to_string(),
            membership_type: "1-trimester".to_string(),
            payment_method: Some(PaymentMethod::BankTransfer),
            card_number: None,
            card_expiry: None,
            card_cvv: None,
            card_holder_name: None,
            phone: None,
            emergency_contact: None,
            billing_address: None,
        }
    }

    fn valid_card_request() -> RegistrationRequest {
        RegistrationRequest {
            payment_method: Some(PaymentMethod::CreditCard),
            card_number: Some("4532015112830366".to_string()),
            card_expiry: Some("12/27".to_string()),
            card_cvv: Some("123".to_string()),
            ..valid_request()
        }
    }

    #[test]
    fn accepts_a_valid_bank_transfer_request() {
        let fields = validate_fields(&valid_request(), &RegistrationPolicy::default(), now())
            .expect("valid request");
        assert_eq!(fields.student_id, "14742770");
        assert_eq!(fields.membership_type, MembershipType::OneTrimester);
        assert_eq!(fields.payment_method, PaymentMethod::BankTransfer);
    }

    #[test]
    fn accepts_a_valid_credit_card_request() {
        assert!(
            validate_fields(&valid_card_request(), &RegistrationPolicy::default(), now()).is_ok()
        );
    }

    #[test]
    fn missing_required_fields_fail_first() {
        // Even with other fields broken, an empty email reports MissingField.
        let request = RegistrationRequest {
            email: String::new(),
            password: "x".to_string(),
            student_id: "12AB56".to_string(),
            ..valid_request()
        };
        assert_eq!(
            validate_fields(&request, &RegistrationPolicy::default(), now()),
            Err(RegistrationError::missing_field("email"))
        );
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let request = RegistrationRequest {
            first_name: "   ".to_string(),
            ..valid_request()
        };
        assert_eq!(
            validate_fields(&request, &RegistrationPolicy::default(), now()),
            Err(RegistrationError::missing_field("firstName"))
        );
    }

    #[test]
    fn absent_payment_method_is_a_missing_field() {
        let request = RegistrationRequest {
            payment_method: None,
            ..valid_request()
        };
        assert_eq!(
            validate_fields(&request, &RegistrationPolicy::default(), now()),
            Err(RegistrationError::missing_field("paymentMethod"))
        );
    }

    #[test]
    fn short_password_is_weak() {
        let request = RegistrationRequest {
            password: "abc12".to_string(),
            ..valid_request()
        };
        assert_eq!(
            validate_fields(&request, &RegistrationPolicy::default(), now()),
            Err(RegistrationError::WeakPassword)
        );
    }

    #[test]
    fn six_character_password_is_accepted() {
        let request = RegistrationRequest {
            password: "abc123".to_string(),
            ..valid_request()
        };
        assert!(validate_fields(&request, &RegistrationPolicy::default(), now()).is_ok());
    }

    #[test]
    fn foreign_domains_are_rejected() {
        for email in [
            "user@gmail.com",
            "user@jcu.edu.au",
            "user@my.jcu.edu.au.evil.com",
            "user@MY.JCU.EDU.AU",
        ] {
            let request = RegistrationRequest {
                email: email.to_string(),
                ..valid_request()
            };
            assert_eq!(
                validate_fields(&request, &RegistrationPolicy::default(), now()),
                Err(RegistrationError::InvalidEmailDomain),
                "{email}"
            );
        }
    }

    #[test]
    fn bad_local_parts_are_rejected() {
        for email in ["@my.jcu.edu.au", "a b@my.jcu.edu.au", "a@b@my.jcu.edu.au"] {
            let request = RegistrationRequest {
                email: email.to_string(),
                ..valid_request()
            };
            assert_eq!(
                validate_fields(&request, &RegistrationPolicy::default(), now()),
                Err(RegistrationError::InvalidEmailDomain),
                "{email}"
            );
        }
    }

    #[test]
    fn local_part_allows_the_documented_specials() {
        let request = RegistrationRequest {
            email: "a.b_c%d+e-f@my.jcu.edu.au".to_string(),
            ..valid_request()
        };
        assert!(validate_fields(&request, &RegistrationPolicy::default(), now()).is_ok());
    }

    #[test]
    fn policy_domain_is_respected() {
        let policy = RegistrationPolicy {
            email_domain: "students.example.edu".to_string(),
        };
        let request = RegistrationRequest {
            email: "abc@students.example.edu".to_string(),
            ..valid_request()
        };
        assert!(validate_fields(&request, &policy, now()).is_ok());

        let wrong = RegistrationRequest {
            email: "abc@my.jcu.edu.au".to_string(),
            ..valid_request()
        };
        assert_eq!(
            validate_fields(&wrong, &policy, now()),
            Err(RegistrationError::InvalidEmailDomain)
        );
    }

    #[test]
    fn student_id_must_be_6_to_10_digits() {
        for bad in ["12AB56", "12345", "12345678901", "1474 2770"] {
            let request = RegistrationRequest {
                student_id: bad.to_string(),
                ..valid_request()
            };
            assert_eq!(
                validate_fields(&request, &RegistrationPolicy::default(), now()),
                Err(RegistrationError::InvalidStudentId),
                "{bad}"
            );
        }
    }

    #[test]
    fn student_id_is_trimmed_before_checking() {
        let request = RegistrationRequest {
            student_id: "  14742770  ".to_string(),
            ..valid_request()
        };
        let fields =
            validate_fields(&request, &RegistrationPolicy::default(), now()).unwrap();
        assert_eq!(fields.student_id, "14742770");
    }

    #[test]
    fn unknown_membership_type_is_rejected() {
        let request = RegistrationRequest {
            membership_type: "premium".to_string(),
            ..valid_request()
        };
        assert_eq!(
            validate_fields(&request, &RegistrationPolicy::default(), now()),
            Err(RegistrationError::unknown_membership_type("premium"))
        );
    }

    #[test]
    fn credit_card_without_card_fields_is_rejected() {
        let request = RegistrationRequest {
            payment_method: Some(PaymentMethod::CreditCard),
            ..valid_request()
        };
        assert_eq!(
            validate_fields(&request, &RegistrationPolicy::default(), now()),
            Err(RegistrationError::MissingPaymentFields)
        );
    }

    #[test]
    fn partially_missing_card_fields_are_rejected() {
        let request = RegistrationRequest {
            card_cvv: None,
            ..valid_card_request()
        };
        assert_eq!(
            validate_fields(&request, &RegistrationPolicy::default(), now()),
            Err(RegistrationError::MissingPaymentFields)
        );
    }

    #[test]
    fn card_rules_fire_in_number_expiry_cvv_order() {
        let bad_number = RegistrationRequest {
            card_number: Some("4532015112830367".to_string()),
            card_expiry: Some("nonsense".to_string()),
            ..valid_card_request()
        };
        assert_eq!(
            validate_fields(&bad_number, &RegistrationPolicy::default(), now()),
            Err(RegistrationError::InvalidCardNumber)
        );

        let expired = RegistrationRequest {
            card_expiry: Some("01/20".to_string()),
            card_cvv: Some("x".to_string()),
            ..valid_card_request()
        };
        assert_eq!(
            validate_fields(&expired, &RegistrationPolicy::default(), now()),
            Err(RegistrationError::CardExpired)
        );

        let bad_cvv = RegistrationRequest {
            card_cvv: Some("12".to_string()),
            ..valid_card_request()
        };
        assert_eq!(
            validate_fields(&bad_cvv, &RegistrationPolicy::default(), now()),
            Err(RegistrationError::InvalidCvv)
        );
    }

    #[test]
    fn card_fields_are_ignored_for_bank_transfer() {
        // A stale expired card left in the payload must not block a bank
        // transfer registration.
        let request = RegistrationRequest {
            payment_method: Some(PaymentMethod::BankTransfer),
            card_number: Some("4532015112830366".to_string()),
            card_expiry: Some("01/20".to_string()),
            card_cvv: Some("123".to_string()),
            ..valid_request()
        };
        assert!(validate_fields(&request, &RegistrationPolicy::default(), now()).is_ok());
    }
}
