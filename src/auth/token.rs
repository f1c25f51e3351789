// JWT token generation and validation service

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id the token was issued for
    pub sub: i32,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Expiration timestamp (seconds)
    pub exp: i64,
}

/// Token service for JWT operations
///
/// Expiry is evaluated lazily at verification time; there is no
/// server-side sweep of expired tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    access_token_duration: i64,  // in seconds
    refresh_token_duration: i64, // in seconds
}

impl TokenService {
    /// Create a new TokenService with the server-held secret.
    /// Access tokens expire in 1 hour, refresh tokens in 7 days.
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            access_token_duration: 3_600,     // 1 hour
            refresh_token_duration: 604_800,  // 7 days
        }
    }

    /// Issue a short-lived access token for the given subject
    pub fn issue_access_token(&self, user_id: i32) -> Result<String, AuthError> {
        self.issue(user_id, self.access_token_duration)
    }

    /// Issue a long-lived refresh token for the given subject
    pub fn issue_refresh_token(&self, user_id: i32) -> Result<String, AuthError> {
        self.issue(user_id, self.refresh_token_duration)
    }

    fn issue(&self, user_id: i32, duration: i64) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + duration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Full signature + expiry verification.
    ///
    /// Used both by the authentication gate for access tokens and before
    /// trusting the subject of a refresh token. The subject claim of an
    /// unverified token is never acted on.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }

    /// Issue both an access and a refresh token
    pub fn issue_token_pair(&self, user_id: i32) -> Result<(String, String), AuthError> {
        let access_token = self.issue_access_token(user_id)?;
        let refresh_token = self.issue_refresh_token(user_id)?;
        Ok((access_token, refresh_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string())
    }

    #[test]
    fn access_token_expiration_is_one_hour() {
        let service = test_token_service();
        let token = service.issue_access_token(1).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 3_600);
    }

    #[test]
    fn refresh_token_expiration_is_seven_days() {
        let service = test_token_service();
        let token = service.issue_refresh_token(1).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn token_subject_decodes_to_issuing_user() {
        let service = test_token_service();
        let token = service.issue_access_token(42).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, 42);
    }

    #[test]
    fn token_pair_contains_two_distinct_valid_tokens() {
        let service = test_token_service();
        let (access_token, refresh_token) = service.issue_token_pair(1).unwrap();

        assert!(service.verify(&access_token).is_ok());
        assert!(service.verify(&refresh_token).is_ok());
        assert_ne!(access_token, refresh_token);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.verify("").is_err());
        assert!(service.verify("not.a.token").is_err());
        assert!(service.verify("invalid_token_format").is_err());
        assert!(service
            .verify("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let service1 = TokenService::new("secret1".to_string());
        let service2 = TokenService::new("secret2".to_string());

        let token = service1.issue_access_token(1).unwrap();

        assert!(service1.verify(&token).is_ok());
        assert!(matches!(service2.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let service = test_token_service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            iat: now - 1_000,
            exp: now - 500,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap();

        assert!(matches!(service.verify(&token), Err(AuthError::ExpiredToken)));
    }

    proptest! {
        #[test]
        fn prop_subject_round_trips(user_id in 1i32..1_000_000) {
            let service = test_token_service();
            let token = service.issue_access_token(user_id).unwrap();
            let claims = service.verify(&token).unwrap();
            prop_assert_eq!(claims.sub, user_id);
        }

        #[test]
        fn prop_malformed_tokens_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(service.verify(&malformed).is_err());
        }
    }
}
