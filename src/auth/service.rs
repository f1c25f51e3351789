// Authentication service - business logic layer

use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{AuthResponse, SignupRequest, UserResponse},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};
use crate::validation::validation_messages;

/// Authentication service coordinating the credential and token lifecycle
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    token_service: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(user_repo: UserRepository, token_service: TokenService) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// Register a new user
    ///
    /// Validates shape, checks username then email uniqueness, hashes the
    /// password and persists the record. The plaintext password is neither
    /// stored nor logged.
    pub async fn signup(&self, request: SignupRequest) -> Result<UserResponse, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::ValidationError(validation_messages(&e)))?;

        let username = request.username.to_lowercase();

        if self.user_repo.username_exists(&username).await? {
            return Err(AuthError::UsernameTaken);
        }
        if self.user_repo.email_exists(&request.email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = PasswordService::hash_password(&request.password)?;
        let user = self
            .user_repo
            .create_user(&username, &request.email, &password_hash)
            .await?;

        tracing::info!("Registered new user {} (id {})", user.username, user.id);
        Ok(user.into())
    }

    /// Login with username and password
    ///
    /// Issues an access/refresh token pair and persists both on the user
    /// record. Unknown usernames are NotFound; a wrong password is
    /// InvalidCredentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let username = username.to_lowercase();
        let user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !PasswordService::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let (access_token, refresh_token) = self.token_service.issue_token_pair(user.id)?;
        self.user_repo
            .store_token_pair(user.id, &access_token, &refresh_token)
            .await?;

        tracing::info!("User {} logged in", user.id);
        Ok(AuthResponse {
            access_token,
            refresh_token,
            user: user.into(),
        })
    }

    /// Logout: null out both stored tokens. Logging out twice is fine.
    pub async fn logout(&self, user_id: i32) -> Result<(), AuthError> {
        self.user_repo.clear_tokens(user_id).await?;
        tracing::info!("User {} logged out", user_id);
        Ok(())
    }

    /// Reset password: verify the old password, re-hash the new one.
    ///
    /// Hashing happens exactly once per plaintext change; the new
    /// plaintext goes through the hasher and nothing else.
    pub async fn reset_password(
        &self,
        user_id: i32,
        old_password: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<(), AuthError> {
        let (old_password, new_password) = match (old_password, new_password) {
            (Some(old), Some(new)) if !old.is_empty() && !new.is_empty() => (old, new),
            _ => {
                return Err(AuthError::ValidationError(vec![
                    "old_password and new_password are both required".to_string(),
                ]))
            }
        };

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !PasswordService::verify_password(old_password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let password_hash = PasswordService::hash_password(new_password)?;
        self.user_repo
            .update_password_hash(user_id, &password_hash)
            .await?;

        tracing::info!("User {} changed their password", user_id);
        Ok(())
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token is fully signature- and expiry-verified before
    /// its subject is trusted. The refresh token itself is not rotated.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.token_service.verify(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let access_token = self.token_service.issue_access_token(user.id)?;
        self.user_repo
            .store_access_token(user.id, &access_token)
            .await?;

        tracing::debug!("Issued fresh access token for user {}", user.id);
        Ok(access_token)
    }
}
