//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::debug;

use notehub_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    ///
    /// Every call embeds a fresh salt, so hashing the same plaintext twice
    /// yields different digests.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id digest.
    ///
    /// Total: a malformed digest or any verification failure yields
    /// `false`, never an error.
    pub fn verify_password(&self, password: &str, digest: &str) -> bool {
        let parsed_hash = match PasswordHash::new(digest) {
            Ok(hash) => hash,
            Err(e) => {
                debug!(error = %e, "Stored password digest is malformed");
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash_password("Secr3t!").unwrap();
        assert!(hasher.verify_password("Secr3t!", &digest));
        assert!(!hasher.verify_password("wrong", &digest));
    }

    #[test]
    fn equal_plaintexts_hash_differently() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("Secr3t!").unwrap();
        let b = hasher.hash_password("Secr3t!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_digest_verifies_false() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_password("Secr3t!", "not-a-digest"));
        assert!(!hasher.verify_password("Secr3t!", ""));
    }
}
