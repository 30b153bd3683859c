//! Password hashing and account password policy
//!
//! Argon2id with the crate defaults; hashes are stored as PHC strings,
//! so parameters and salt travel with the hash and can be tightened
//! later without invalidating existing accounts.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::types::{PathwayError, Result};

/// Minimum accepted password length, enforced at registration and reset
pub const MIN_PASSWORD_LEN: usize = 6;

/// Reject passwords that fail the account policy
///
/// The message is user-facing; callers decide the transport (400 for
/// HTTP, non-zero exit for CLIs).
pub fn check_password_policy(password: &str) -> std::result::Result<(), String> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

/// Hash a password into an argon2id PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PathwayError::Auth(format!("Failed to hash password: {e}")))
}

/// Check a password against a stored PHC hash
///
/// A malformed stored hash is an error; a wrong password is `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| PathwayError::Auth(format!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_matching_password_only() {
        let hash = hash_password("correct-horse-battery-staple").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse-battery-staple", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same-password", &first).unwrap());
        assert!(verify_password("same-password", &second).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("password", "not-a-phc-string").is_err());
    }

    #[test]
    fn policy_rejects_short_passwords() {
        assert!(check_password_policy("12345").is_err());
        assert!(check_password_policy("123456").is_ok());
    }
}
