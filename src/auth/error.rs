// Authentication error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use crate::response::ErrorBody;

/// Error types for account and token operations
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Request validation failed")]
    ValidationError(Vec<String>),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    /// No credential was presented at all
    #[error("Missing authentication token")]
    MissingToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Password hashing error")]
    PasswordHashError,

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::DatabaseError(err.to_string())
    }
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AuthError::MissingToken => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::UsernameTaken => StatusCode::CONFLICT,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::PasswordHashError => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe message for this error; internal detail stays in logs
    fn client_message(&self) -> String {
        match self {
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::ValidationError(messages) => {
                debug!("Auth validation failed: {:?}", messages)
            }
            AuthError::InvalidCredentials => warn!("Invalid credentials presented"),
            AuthError::InvalidToken => warn!("Invalid token attempt"),
            AuthError::ExpiredToken => warn!("Expired token attempt"),
            AuthError::MissingToken => warn!("Request without credential to protected route"),
            AuthError::UserNotFound => debug!("Login attempt for unknown username"),
            AuthError::UsernameTaken | AuthError::EmailTaken => {
                warn!("Signup uniqueness conflict: {}", self)
            }
            AuthError::DatabaseError(msg) => error!("Database error in auth: {}", msg),
            AuthError::PasswordHashError => error!("Password hashing primitive failed"),
            AuthError::TokenGenerationError(msg) => error!("Token generation error: {}", msg),
        }

        let errors = match &self {
            AuthError::ValidationError(messages) => messages.clone(),
            _ => Vec::new(),
        };

        ErrorBody::with_errors(self.status_code(), self.client_message(), errors)
            .into_response_with_status()
    }
}
