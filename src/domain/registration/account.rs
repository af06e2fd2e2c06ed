//! Validated intake records: the pending account and its billing intent.
//!
//! Both are created together at successful validation and never mutated by
//! this service; approval and payment capture happen in an external
//! workflow.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::plan::{MembershipPlan, MembershipType, CURRENCY};
use super::request::{EmergencyContact, PaymentMethod};
use crate::domain::foundation::{AccountId, BillingIntentId, Timestamp};

/// Account lifecycle status. Registration only ever produces `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Pending,
    Approved,
    Suspended,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Pending => "pending",
            AccountStatus::Approved => "approved",
            AccountStatus::Suspended => "suspended",
        }
    }
}

/// Payment lifecycle status. Registration only ever produces `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// Opaque reference tying the account to its billing intent, quoted back to
/// the member for bank transfers. `PAY_` plus 8 uppercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentReference(String);

impl PaymentReference {
    /// Generates a fresh reference token.
    pub fn generate() -> Self {
        let token = Uuid::new_v4().simple().to_string();
        Self(format!("PAY_{}", token[..8].to_uppercase()))
    }

    /// Wraps an already-persisted reference.
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaymentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The validated, not-yet-approved registration result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAccount {
    pub id: AccountId,
    pub email: String,
    /// Salted adaptive hash; the plaintext is never stored.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Whitespace-trimmed, digits only.
    pub student_id: String,
    pub membership_type: MembershipType,
    pub status: AccountStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub payment_reference: PaymentReference,
    pub phone: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub billing_address: Option<String>,
    /// Membership validity end: registration date plus the plan duration.
    pub expiry_date: Timestamp,
    pub registered_at: Timestamp,
}

/// Everything needed to construct a `PendingAccount`.
///
/// Identity and contact fields come from the validated request; the hash
/// from the password hasher; `now` from the injected clock.
#[derive(Debug, Clone)]
pub struct AccountDraft {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    pub payment_method: PaymentMethod,
    pub phone: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub billing_address: Option<String>,
}

impl PendingAccount {
    /// Builds the pending account for a validated registration.
    pub fn create(draft: AccountDraft, plan: &MembershipPlan, now: Timestamp) -> Self {
        Self {
            id: AccountId::new(),
            email: draft.email,
            password_hash: draft.password_hash,
            first_name: draft.first_name,
            last_name: draft.last_name,
            student_id: draft.student_id,
            membership_type: plan.membership_type,
            status: AccountStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: draft.payment_method,
            payment_reference: PaymentReference::generate(),
            phone: draft.phone,
            emergency_contact: draft.emergency_contact,
            billing_address: draft.billing_address,
            expiry_date: now.add_calendar_months(plan.duration_months),
            registered_at: now,
        }
    }
}

/// The amount owed for a registration, recorded before any payment is
/// confirmed. One per account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingIntent {
    pub id: BillingIntentId,
    pub account_id: AccountId,
    /// Amount owed in SGD cents.
    pub amount_cents: i64,
    pub currency: &'static str,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub payment_reference: PaymentReference,
    pub description: String,
    pub created_at: Timestamp,
}

impl BillingIntent {
    /// Builds the billing intent paired with a pending account.
    pub fn for_account(account: &PendingAccount, plan: &MembershipPlan, now: Timestamp) -> Self {
        Self {
            id: BillingIntentId::new(),
            account_id: account.id,
            amount_cents: plan.amount_due_cents,
            currency: CURRENCY,
            status: PaymentStatus::Pending,
            payment_method: account.payment_method,
            payment_reference: account.payment_reference.clone(),
            description: format!("{} membership registration", plan.membership_type),
            created_at: now,
        }
    }
}
