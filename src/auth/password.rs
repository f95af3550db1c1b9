//! Argon2id password hashing and verification.

use crate::error::AppError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// Returns a PHC-format string embedding algorithm parameters and salt.
/// Two calls with the same password produce different strings; digests
/// must never be compared for equality.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-format digest.
///
/// Returns `false` for a wrong password or a malformed digest; verification
/// uses the salt and parameters embedded in the digest and compares in
/// constant time.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let digest = hash_password("longenough1").unwrap();
        assert!(verify_password("longenough1", &digest));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let digest = hash_password("correct horse").unwrap();
        assert!(!verify_password("battery staple", &digest));
    }

    #[test]
    fn test_digests_are_salted() {
        // Fresh salt per call: same input, different output
        let a = hash_password("same-input").unwrap();
        let b = hash_password("same-input").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same-input", &a));
        assert!(verify_password("same-input", &b));
    }

    #[test]
    fn test_malformed_digest_is_false_not_panic() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }
}
