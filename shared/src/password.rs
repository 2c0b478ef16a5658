//! Client-side password hashing for the create flow.
//!
//! The service stores whatever arrives under `password_hash`, so the panel
//! replaces the typed password with a salted bcrypt hash before it is sent.

use thiserror::Error;

pub const PASSWORD_HASH_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Hashes `plaintext` with a fresh random salt.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(plaintext, PASSWORD_HASH_COST)?)
}

pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
    Ok(bcrypt::verify(plaintext, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let first = hash_password("correct horse").unwrap();
        let second = hash_password("correct horse").unwrap();

        assert_ne!(first, "correct horse");
        assert_ne!(first, second);
        assert!(verify_password("correct horse", &first).unwrap());
        assert!(verify_password("correct horse", &second).unwrap());
        assert!(!verify_password("wrong horse", &first).unwrap());
    }

    #[test]
    fn test_hash_uses_configured_cost() {
        let hash = hash_password("pw").unwrap();
        assert!(hash.starts_with("$2b$10$"), "unexpected hash prefix: {hash}");
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify_password("pw", "not-a-bcrypt-hash").is_err());
    }
}
