//! Foundation value objects shared across the domain.

mod ids;
mod timestamp;

pub use ids::{AccountId, BillingIntentId};
pub use timestamp::Timestamp;
