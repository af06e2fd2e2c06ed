//! Registration domain: membership application validation and intake.

mod account;
pub mod card;
mod errors;
mod plan;
mod request;
mod validator;

pub use account::{
    AccountDraft, AccountStatus, BillingIntent, PaymentReference, PaymentStatus, PendingAccount,
};
pub use errors::RegistrationError;
pub use plan::{MembershipPlan, MembershipType, CURRENCY};
pub use request::{EmergencyContact, PaymentMethod, RegistrationRequest};
pub use validator::{validate_fields, RegistrationPolicy, ValidatedFields};
