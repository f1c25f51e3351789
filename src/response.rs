// Response envelope module
// Every endpoint answers with exactly one of two JSON shapes:
//   success: { "success": true,  "status", "message", "data" }
//   error:   { "success": false, "status", "message", "errors": [] }

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Success envelope wrapping handler payloads
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Build a success envelope for the given status code and payload
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }
}

/// Error envelope returned by every failing endpoint
///
/// `errors` carries field-level detail (e.g. every validation message);
/// it is empty for errors without per-field detail.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub status: u16,
    pub message: String,
    pub errors: Vec<String>,
}

impl ErrorBody {
    /// Build an error envelope with a detail list
    pub fn with_errors(status: StatusCode, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            status: status.as_u16(),
            message: message.into(),
            errors,
        }
    }

    /// Build an error envelope without detail
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::with_errors(status, message, Vec::new())
    }

    /// Convert into a full HTTP response
    pub fn into_response_with_status(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        self.into_response_with_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_has_stable_shape() {
        let envelope = ApiResponse::new(StatusCode::CREATED, "created", serde_json::json!({"id": 1}));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["status"], 201);
        assert_eq!(value["message"], "created");
        assert_eq!(value["data"]["id"], 1);
    }

    #[test]
    fn error_envelope_has_stable_shape() {
        let envelope = ErrorBody::with_errors(
            StatusCode::BAD_REQUEST,
            "Request validation failed",
            vec!["title: must not be empty".to_string()],
        );
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["status"], 400);
        assert_eq!(value["errors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn error_envelope_defaults_to_empty_detail_list() {
        let envelope = ErrorBody::new(StatusCode::NOT_FOUND, "Task not found");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["errors"].as_array().unwrap().len(), 0);
    }
}
