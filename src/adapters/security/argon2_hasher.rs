//! Argon2 implementation of the PasswordHasher port.

use argon2::password_hash::{rand_core::OsRng, PasswordHasher as _, SaltString};
use argon2::Argon2;

use crate::ports::{HashError, PasswordHasher};

/// Argon2id with library defaults and a fresh random salt per hash. The
/// salt and parameters are encoded in the output string (PHC format), so
/// verification needs nothing beyond the hash itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| HashError(e.to_string()))?;
        Ok(hash.to_string())
    }
}
