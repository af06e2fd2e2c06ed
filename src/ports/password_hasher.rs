//! Password hasher port.

use thiserror::Error;

/// Hashing failure. Always internal; never shown to the submitter.
#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(pub String);

/// Produces irreversible, salted, cost-factored password hashes.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, HashError>;
}
