//! Ports - interfaces for external collaborators.
//!
//! The registration flow consumes three collaborators, all out of scope for
//! this service and specified only by the interface it needs:
//!
//! - `AccountStore` - uniqueness lookups and the atomic account + billing
//!   intent write
//! - `PasswordHasher` - irreversible salted hashing
//! - `Clock` - injected "now" for expiry computations

mod account_store;
mod clock;
mod password_hasher;

pub use account_store::{AccountStore, StoreError, UniqueField};
pub use clock::Clock;
pub use password_hasher::{HashError, PasswordHasher};
