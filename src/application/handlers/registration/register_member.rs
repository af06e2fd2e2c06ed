//! RegisterMemberHandler - command handler for membership intake.

use std::sync::Arc;

use crate::domain::registration::{
    validate_fields, AccountDraft, BillingIntent, PendingAccount, RegistrationError,
    RegistrationPolicy, RegistrationRequest,
};
use crate::ports::{AccountStore, Clock, PasswordHasher, StoreError, UniqueField};

/// Command to register a new member.
#[derive(Debug, Clone)]
pub struct RegisterMemberCommand {
    pub request: RegistrationRequest,
}

/// Result of a successful registration: both records as persisted.
#[derive(Debug, Clone)]
pub struct RegisterMemberResult {
    pub account: PendingAccount,
    pub intent: BillingIntent,
}

/// Validates a membership application and, if valid, persists the pending
/// account together with its billing intent.
///
/// Validation failures have no side effects. The lookup phase and the write
/// are not atomic with each other, so write-time constraint violations are
/// folded back into the duplicate errors rather than treated as fatal.
pub struct RegisterMemberHandler {
    store: Arc<dyn AccountStore>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    policy: RegistrationPolicy,
}

impl RegisterMemberHandler {
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
        policy: RegistrationPolicy,
    ) -> Self {
        Self {
            store,
            hasher,
            clock,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterMemberCommand,
    ) -> Result<RegisterMemberResult, RegistrationError> {
        let now = self.clock.now();

        // 1-6. Field rules, fail fast.
        let fields = validate_fields(&cmd.request, &self.policy, now)?;

        // 7. Uniqueness against the store.
        if self.existing(self.store.find_by_email(&cmd.request.email)).await? {
            return Err(RegistrationError::DuplicateEmail);
        }
        if self
            .existing(self.store.find_by_student_id(&fields.student_id))
            .await?
        {
            return Err(RegistrationError::DuplicateStudentId);
        }

        let password_hash = self
            .hasher
            .hash(&cmd.request.password)
            .map_err(|e| RegistrationError::persistence(e.to_string()))?;

        let plan = fields.membership_type.plan();
        let account = PendingAccount::create(
            AccountDraft {
                email: cmd.request.email.clone(),
                password_hash,
                first_name: cmd.request.first_name.clone(),
                last_name: cmd.request.last_name.clone(),
                student_id: fields.student_id,
                payment_method: fields.payment_method,
                phone: cmd.request.phone.clone(),
                emergency_contact: cmd.request.emergency_contact.clone(),
                billing_address: cmd.request.billing_address.clone(),
            },
            &plan,
            now,
        );
        let intent = BillingIntent::for_account(&account, &plan, now);

        // Atomic write; a constraint violation here means we lost a race.
        self.store
            .create_account_and_billing_intent(&account, &intent)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(UniqueField::Email) => {
                    tracing::warn!(account_id = %account.id, "registration lost email uniqueness race");
                    RegistrationError::DuplicateEmail
                }
                StoreError::UniqueViolation(UniqueField::StudentId) => {
                    tracing::warn!(account_id = %account.id, "registration lost student id uniqueness race");
                    RegistrationError::DuplicateStudentId
                }
                StoreError::Unavailable(msg) => {
                    tracing::error!(account_id = %account.id, error = %msg, "registration write failed");
                    RegistrationError::persistence(msg)
                }
            })?;

        tracing::info!(
            account_id = %account.id,
            membership_type = %account.membership_type,
            payment_reference = %account.payment_reference,
            "registration accepted, pending approval"
        );

        Ok(RegisterMemberResult { account, intent })
    }

    async fn existing(
        &self,
        lookup: impl std::future::Future<
            Output = Result<Option<crate::domain::foundation::AccountId>, StoreError>,
        >,
    ) -> Result<bool, RegistrationError> {
        match lookup.await {
            Ok(found) => Ok(found.is_some()),
            Err(e) => Err(RegistrationError::persistence(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AccountId, Timestamp};
    use crate::domain::registration::{PaymentMethod, PaymentStatus};
    use crate::ports::HashError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ─── Mock implementations ────────────────────────────────────────────

    #[derive(Default)]
    struct MockAccountStore {
        by_email: Mutex<Vec<String>>,
        by_student_id: Mutex<Vec<String>>,
        created: Mutex<Vec<(PendingAccount, BillingIntent)>>,
        fail_write: Option<fn() -> StoreError>,
    }

    impl MockAccountStore {
        fn with_existing_email(email: &str) -> Self {
            let store = Self::default();
            store.by_email.lock().unwrap().push(email.to_string());
            store
        }

        fn with_existing_student_id(student_id: &str) -> Self {
            let store = Self::default();
            store
                .by_student_id
                .lock()
                .unwrap()
                .push(student_id.to_string());
            store
        }

        fn failing_with(make: fn() -> StoreError) -> Self {
            Self {
                fail_write: Some(make),
                ..Self::default()
            }
        }

        fn created(&self) -> Vec<(PendingAccount, BillingIntent)> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AccountStore for MockAccountStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<AccountId>, StoreError> {
            Ok(self
                .by_email
                .lock()
                .unwrap()
                .iter()
                .any(|e| e == email)
                .then(AccountId::new))
        }

        async fn find_by_student_id(
            &self,
            student_id: &str,
        ) -> Result<Option<AccountId>, StoreError> {
            Ok(self
                .by_student_id
                .lock()
                .unwrap()
                .iter()
                .any(|s| s == student_id)
                .then(AccountId::new))
        }

        async fn create_account_and_billing_intent(
            &self,
            account: &PendingAccount,
            intent: &BillingIntent,
        ) -> Result<(), StoreError> {
            if let Some(make) = self.fail_write {
                return Err(make());
            }
            self.created
                .lock()
                .unwrap()
                .push((account.clone(), intent.clone()));
            Ok(())
        }
    }

    struct MockHasher;

    impl PasswordHasher for MockHasher {
        fn hash(&self, plaintext: &str) -> Result<String, HashError> {
            Ok(format!("$mock${}", plaintext.len()))
        }
    }

    struct FixedClock(Timestamp);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    // ─── Helpers ─────────────────────────────────────────────────────────

    fn now() -> Timestamp {
        Timestamp::parse_rfc3339("2026-08-23T09:00:00Z").unwrap()
    }

    fn request() -> RegistrationRequest {
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

    fn handler(store: Arc<MockAccountStore>) -> RegisterMemberHandler {
        RegisterMemberHandler::new(
            store,
            Arc::new(MockHasher),
            Arc::new(FixedClock(now())),
            RegistrationPolicy::default(),
        )
    }

    // ─── Tests ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn valid_registration_persists_account_and_intent_together() {
        let store = Arc::new(MockAccountStore::default());
        let result = handler(store.clone())
            .handle(RegisterMemberCommand { request: request() })
            .await
            .expect("registration should succeed");

        let created = store.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].0.id, result.account.id);
        assert_eq!(created[0].1.account_id, result.account.id);
        assert_eq!(result.intent.amount_cents, 15_000);
        assert_eq!(result.account.expiry_date, now().add_calendar_months(4));
        assert_eq!(result.intent.status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn password_is_hashed_never_stored() {
        let store = Arc::new(MockAccountStore::default());
        let result = handler(store)
            .handle(RegisterMemberCommand { request: request() })
            .await
            .unwrap();
        assert_eq!(result.account.password_hash, "$mock$7");
        assert!(!result.account.password_hash.contains("secret1"));
    }

    #[tokio::test]
    async fn validation_failure_writes_nothing() {
        let store = Arc::new(MockAccountStore::default());
        let bad = RegistrationRequest {
            student_id: "12AB56".to_string(),
            ..request()
        };
        let err = handler(store.clone())
            .handle(RegisterMemberCommand { request: bad })
            .await
            .unwrap_err();
        assert_eq!(err, RegistrationError::InvalidStudentId);
        assert!(store.created().is_empty());
    }

    #[tokio::test]
    async fn existing_email_is_a_duplicate() {
        let store = Arc::new(MockAccountStore::with_existing_email("abc@my.jcu.edu.au"));
        let err = handler(store)
            .handle(RegisterMemberCommand { request: request() })
            .await
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateEmail);
    }

    #[tokio::test]
    async fn existing_student_id_is_a_duplicate() {
        let store = Arc::new(MockAccountStore::with_existing_student_id("14742770"));
        let err = handler(store)
            .handle(RegisterMemberCommand { request: request() })
            .await
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateStudentId);
    }

    #[tokio::test]
    async fn write_time_email_race_maps_to_duplicate_email() {
        let store = Arc::new(MockAccountStore::failing_with(|| {
            StoreError::UniqueViolation(UniqueField::Email)
        }));
        let err = handler(store)
            .handle(RegisterMemberCommand { request: request() })
            .await
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateEmail);
    }

    #[tokio::test]
    async fn write_time_student_id_race_maps_to_duplicate_student_id() {
        let store = Arc::new(MockAccountStore::failing_with(|| {
            StoreError::UniqueViolation(UniqueField::StudentId)
        }));
        let err = handler(store)
            .handle(RegisterMemberCommand { request: request() })
            .await
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateStudentId);
    }

    #[tokio::test]
    async fn store_outage_is_a_retryable_persistence_failure() {
        let store = Arc::new(MockAccountStore::failing_with(|| {
            StoreError::Unavailable("connection refused".to_string())
        }));
        let err = handler(store)
            .handle(RegisterMemberCommand { request: request() })
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrationError::PersistenceFailure(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn repeated_registrations_are_structurally_equal_under_a_fixed_clock() {
        let first = handler(Arc::new(MockAccountStore::default()))
            .handle(RegisterMemberCommand { request: request() })
            .await
            .unwrap();
        let second = handler(Arc::new(MockAccountStore::default()))
            .handle(RegisterMemberCommand { request: request() })
            .await
            .unwrap();

        // Identical except for generated identifiers and reference tokens.
        assert_eq!(first.account.email, second.account.email);
        assert_eq!(first.account.expiry_date, second.account.expiry_date);
        assert_eq!(first.account.registered_at, second.account.registered_at);
        assert_eq!(first.intent.amount_cents, second.intent.amount_cents);
        assert_ne!(first.account.id, second.account.id);
        assert_ne!(
            first.account.payment_reference,
            second.account.payment_reference
        );
    }
}
