//! Account store port.
//!
//! The only shared resource the registration flow touches. Implementations
//! must back uniqueness with hard constraints: concurrent submissions can
//! both pass the lookup phase, so the atomic create must surface a
//! constraint violation for the loser of the race rather than writing a
//! second row.

use crate::domain::foundation::AccountId;
use crate::domain::registration::{BillingIntent, PendingAccount};
use async_trait::async_trait;
use thiserror::Error;

/// Which unique column a constraint violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    StudentId,
}

/// Store-level failures, kept deliberately small: the application layer
/// only distinguishes "someone got there first" from "the store is broken".
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the write.
    #[error("unique constraint violated on {0:?}")]
    UniqueViolation(UniqueField),

    /// Connection failure, rollback, or any other driver error.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence port for accounts and their billing intents.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Looks up an account by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountId>, StoreError>;

    /// Looks up an account by (cleaned) student id.
    async fn find_by_student_id(&self, student_id: &str)
        -> Result<Option<AccountId>, StoreError>;

    /// Persists the account and its billing intent as one atomic unit.
    ///
    /// Either both rows are written or neither is. Unique-index violations
    /// come back as `StoreError::UniqueViolation`, not `Unavailable`.
    async fn create_account_and_billing_intent(
        &self,
        account: &PendingAccount,
        intent: &BillingIntent,
    ) -> Result<(), StoreError>;
}
