//! Clock port.
//!
//! Expiry dates and card-expiry checks depend on "now"; injecting the clock
//! keeps those paths deterministic in tests.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
