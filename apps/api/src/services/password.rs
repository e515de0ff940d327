//! Password hashing with Argon2id
//!
//! User routes hash incoming passwords before anything reaches the
//! repository, so plaintext secrets never enter a persisted field map.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{ApiError, ApiResult};

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Argon2id password hashing service
#[derive(Clone, Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a candidate password's strength
    pub fn validate(&self, password: &str) -> ApiResult<()> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::ValidationError(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &str) -> ApiResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))
    }

    /// Verify a password against a stored hash
    pub fn verify(&self, password: &str, hash: &str) -> ApiResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| ApiError::Internal(format!("stored password hash is invalid: {}", e)))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_round_trip() {
        let service = PasswordService::new();
        let hash = service.hash("correct horse battery staple").unwrap();
        assert!(service.verify("correct horse battery staple", &hash).unwrap());
        assert!(!service.verify("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let service = PasswordService::new();
        let first = service.hash("same password").unwrap();
        let second = service.hash("same password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_validate_rejects_short_passwords() {
        let service = PasswordService::new();
        assert!(service.validate("short").is_err());
        assert!(service.validate("long enough").is_ok());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let service = PasswordService::new();
        assert!(service.verify("anything", "not-a-phc-string").is_err());
    }
}
