// Task error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::response::ErrorBody;

/// Error types for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Request validation failed")]
    ValidationError(Vec<String>),

    #[error("Task not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for TaskError {
    fn from(err: sqlx::Error) -> Self {
        TaskError::DatabaseError(err.to_string())
    }
}

impl TaskError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskError::ValidationError(_) => StatusCode::BAD_REQUEST,
            TaskError::NotFound => StatusCode::NOT_FOUND,
            TaskError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let (message, errors) = match &self {
            TaskError::ValidationError(messages) => {
                debug!("Task validation failed: {:?}", messages);
                ("Request validation failed".to_string(), messages.clone())
            }
            TaskError::NotFound => {
                debug!("Task not found");
                ("Task not found".to_string(), Vec::new())
            }
            TaskError::DatabaseError(msg) => {
                error!("Database error in tasks: {}", msg);
                ("Internal server error".to_string(), Vec::new())
            }
        };

        ErrorBody::with_errors(self.status_code(), message, errors).into_response_with_status()
    }
}
