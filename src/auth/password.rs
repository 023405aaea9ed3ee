use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks a password against a stored bcrypt hash.
///
/// A stored hash that bcrypt cannot parse is treated as a mismatch.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    match verify(password, hashed_password) {
        Ok(matches) => matches,
        Err(e) => {
            log::warn!("stored password hash could not be verified: {}", e);
            false
        }
    }
}
