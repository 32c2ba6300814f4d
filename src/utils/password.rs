//! Salted password hashing.
//!
//! Passwords are stored as Argon2id PHC strings
//! (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`), so the parameters and
//! salt travel with every hash and no server secret is involved.

use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde_json::json;

use crate::error::AppError;

const SALT_LEN: usize = 16;

/// Hashes and verifies user passwords with Argon2id.
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes `password` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the system RNG is unavailable or
    /// hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let mut salt = [0u8; SALT_LEN];
        getrandom::fill(&mut salt).map_err(|e| {
            AppError::internal("Random generator failure", json!({ "reason": e.to_string() }))
        })?;
        let salt = SaltString::encode_b64(&salt).map_err(hash_error)?;

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(hash_error)?;
        Ok(hash.to_string())
    }

    /// Checks `password` against a stored PHC string.
    ///
    /// Malformed or foreign-format stored values never verify.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

fn hash_error(e: argon2::password_hash::Error) -> AppError {
    AppError::internal("Password hashing failed", json!({ "reason": e.to_string() }))
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}
