//! Argon2id password hashing and verification.
//!
//! Hashes are PHC strings, so the algorithm parameters and salt travel with
//! the hash itself.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{EngineError, ResultEngine};

/// Shortest password accepted for a new user, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn is_acceptable_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Hash a plaintext password with a random salt.
pub(crate) fn hash_password(password: &str) -> ResultEngine<String> {
    if !is_acceptable_password(password) {
        return Err(EngineError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::Configuration(format!("password hashing failed: {err}")))
}

/// Check a plaintext password against a stored hash.
///
/// A malformed stored hash never matches.
pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        tracing::warn!("stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
