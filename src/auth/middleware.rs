// Authentication gate for protected routes
//
// Exactly two outcomes: pass through with the resolved identity attached,
// or short-circuit with an error response. The gate never writes state.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::debug;

use crate::auth::error::AuthError;
use crate::AppState;

/// Cookie that carries the access token for browser clients
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authenticated identity attached to protected requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
    pub email: String,
}

/// Pull a bearer token from the request: the access-token cookie first,
/// the Authorization header if no cookie is present.
pub fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(cookie_header) = parts.headers.get(header::COOKIE) {
        if let Ok(cookies) = cookie_header.to_str() {
            for pair in cookies.split(';') {
                let pair = pair.trim();
                if let Some(value) = pair
                    .strip_prefix(ACCESS_TOKEN_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                {
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        // No credential at all is Forbidden; a bad credential is Unauthorized
        let token = extract_token(parts).ok_or(AuthError::MissingToken)?;

        let claims = state.token_service.verify(&token)?;

        // A verified subject that no longer resolves to a user is treated
        // the same as a bad token
        let user = state
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        debug!("Authenticated request for user {}", user.id);
        Ok(AuthenticatedUser {
            user_id: user.id,
            username: user.username,
            email: user.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(header::HeaderName, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(name, *value);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn extracts_token_from_cookie() {
        let parts = parts_with_headers(&[(header::COOKIE, "access_token=abc123; theme=dark")]);
        assert_eq!(extract_token(&parts).as_deref(), Some("abc123"));
    }

    #[test]
    fn extracts_token_from_bearer_header() {
        let parts = parts_with_headers(&[(header::AUTHORIZATION, "Bearer xyz789")]);
        assert_eq!(extract_token(&parts).as_deref(), Some("xyz789"));
    }

    #[test]
    fn cookie_takes_precedence_over_header() {
        let parts = parts_with_headers(&[
            (header::COOKIE, "access_token=from_cookie"),
            (header::AUTHORIZATION, "Bearer from_header"),
        ]);
        assert_eq!(extract_token(&parts).as_deref(), Some("from_cookie"));
    }

    #[test]
    fn empty_cookie_falls_back_to_header() {
        let parts = parts_with_headers(&[
            (header::COOKIE, "access_token="),
            (header::AUTHORIZATION, "Bearer from_header"),
        ]);
        assert_eq!(extract_token(&parts).as_deref(), Some("from_header"));
    }

    #[test]
    fn similarly_named_cookie_is_ignored() {
        let parts = parts_with_headers(&[(header::COOKIE, "access_token_v2=nope")]);
        assert_eq!(extract_token(&parts), None);
    }

    #[test]
    fn no_credential_yields_none() {
        let parts = parts_with_headers(&[]);
        assert_eq!(extract_token(&parts), None);
    }

    #[test]
    fn non_bearer_authorization_is_ignored() {
        let parts = parts_with_headers(&[(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")]);
        assert_eq!(extract_token(&parts), None);
    }
}
