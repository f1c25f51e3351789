// Password hashing and verification service

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::auth::error::AuthError;

/// Password service for hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a fresh random salt.
    ///
    /// Hashing happens exactly once per plaintext change; callers must
    /// never pass an already-hashed value back in.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    /// Verify a password against a stored hash.
    ///
    /// A wrong password is Ok(false), not an error; only a corrupt hash
    /// or a failing primitive surfaces as `PasswordHashError`.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashError)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(AuthError::PasswordHashError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = PasswordService::hash_password("correct horse battery").unwrap();
        assert!(PasswordService::verify_password("correct horse battery", &hash).unwrap());
    }

    #[test]
    fn hash_never_equals_plaintext() {
        let hash = PasswordService::hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn wrong_password_returns_false_not_error() {
        let hash = PasswordService::hash_password("right-password").unwrap();
        let result = PasswordService::verify_password("wrong-password", &hash);
        assert_eq!(result.unwrap(), false);
    }

    #[test]
    fn same_plaintext_hashes_differently_each_time() {
        let first = PasswordService::hash_password("repeated").unwrap();
        let second = PasswordService::hash_password("repeated").unwrap();
        // Fresh salt every time
        assert_ne!(first, second);
    }

    #[test]
    fn corrupt_hash_is_an_internal_error() {
        let result = PasswordService::verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::PasswordHashError)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_round_trip_verifies(password in "[a-zA-Z0-9 ]{8,32}") {
            let hash = PasswordService::hash_password(&password).unwrap();
            prop_assert!(PasswordService::verify_password(&password, &hash).unwrap());
            prop_assert_ne!(hash, password);
        }
    }
}
