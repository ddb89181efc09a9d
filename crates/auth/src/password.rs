//! Password hashing and verification utilities.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use once_cell::sync::Lazy;

use crate::AuthError;

/// Hash with the same parameters as real accounts, verified when a login
/// names an unknown user so both failure paths cost one argon2 run.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("jackfruit-placeholder-credential").ok());

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against its stored hash.
///
/// A malformed hash is an error; a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other.into()),
    }
}

/// Run a full verification against a placeholder hash and discard the result.
pub fn verify_against_placeholder(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "test_password_123";
        let hash = hash_password(password).unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_placeholder_hash_is_a_real_argon2_hash() {
        let hash = DUMMY_HASH.as_deref().unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(!verify_password("anything else", hash).unwrap());
        verify_against_placeholder("anything else");
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = verify_password("whatever", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::PasswordHash(_))));
    }
}
