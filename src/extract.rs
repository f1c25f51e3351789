// Request body extraction
//
// Wraps axum's JSON extractor so framework-level body rejections answer
// with the same error envelope as domain errors: any malformed,
// unparseable or incomplete body is 400, an oversized body is 413.
// Without this, axum answers those cases with plain-text bodies and its
// own status choices (422 for a missing field).

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::response::ErrorBody;

/// JSON body extractor whose rejections use the error envelope
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => Err(envelope_for(&rejection)),
        }
    }
}

// Delegates to axum's Json so handlers use one name for both directions
impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

fn envelope_for(rejection: &JsonRejection) -> Response {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::debug!("Rejected oversized request body");
        return ErrorBody::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
            .into_response();
    }

    // Syntax errors, missing/mistyped fields and a wrong content type
    // are all the caller's fault in the same way
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    ErrorBody::with_errors(
        StatusCode::BAD_REQUEST,
        "Malformed request body",
        vec![rejection.body_text()],
    )
    .into_response()
}
