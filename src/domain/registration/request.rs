//! Typed registration request.
//!
//! The HTTP layer parses JSON into this structure before the validator runs;
//! the validator never sees raw request bodies. Required fields arrive as
//! plain strings (possibly empty, which the validator rejects); everything
//! the form treats as optional is an `Option`.

use serde::{Deserialize, Serialize};

/// Payment method chosen on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    Paypal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Paypal => "paypal",
        }
    }
}

/// Emergency contact captured at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

/// A membership application as submitted, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub email: String,
    /// Plaintext password; only its hash ever leaves this process.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    /// Raw membership type value; resolved against the plan table.
    pub membership_type: String,
    /// Absent when the field was missing from the request body.
    pub payment_method: Option<PaymentMethod>,
    pub card_number: Option<String>,
    /// `MM/YY`.
    pub card_expiry: Option<String>,
    pub card_cvv: Option<String>,
    pub card_holder_name: Option<String>,
    pub phone: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub billing_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_uses_snake_case_wire_values() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            "\"credit_card\""
        );
        let parsed: PaymentMethod = serde_json::from_str("\"bank_transfer\"").unwrap();
        assert_eq!(parsed, PaymentMethod::BankTransfer);
    }

    #[test]
    fn payment_method_rejects_unknown_values() {
        let result: Result<PaymentMethod, _> = serde_json::from_str("\"bitcoin\"");
        assert!(result.is_err());
    }

    #[test]
    fn as_str_matches_wire_values() {
        assert_eq!(PaymentMethod::CreditCard.as_str(), "credit_card");
        assert_eq!(PaymentMethod::BankTransfer.as_str(), "bank_transfer");
        assert_eq!(PaymentMethod::Paypal.as_str(), "paypal");
    }
}
