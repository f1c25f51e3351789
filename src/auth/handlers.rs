// HTTP handlers for authentication endpoints

use axum::{extract::State, http::header, http::StatusCode};

use crate::auth::{
    error::AuthError,
    middleware::{AuthenticatedUser, ACCESS_TOKEN_COOKIE},
    models::{
        AccessTokenResponse, AuthResponse, LoginRequest, PasswordResetRequest, RefreshRequest,
        SignupRequest, UserResponse,
    },
};
use crate::extract::Json;
use crate::response::ApiResponse;
use crate::AppState;

/// Cookie attributes for the issued access token (1 hour, HttpOnly)
fn access_token_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600",
        ACCESS_TOKEN_COOKIE, token
    )
}

/// Cookie that immediately expires: clears any stored token client-side
fn cleared_token_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", ACCESS_TOKEN_COOKIE)
}

/// Handler for POST /api/v1/auth/signup
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "auth"
)]
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AuthError> {
    let user = state.auth_service.signup(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED, "User registered successfully", user)),
    ))
}

/// Handler for POST /api/v1/auth/login
/// Issues an access/refresh token pair and sets the access-token cookie
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "Unknown username")
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<
    (
        StatusCode,
        [(header::HeaderName, String); 1],
        Json<ApiResponse<AuthResponse>>,
    ),
    AuthError,
> {
    let auth = state
        .auth_service
        .login(&request.username, &request.password)
        .await?;

    let cookie = access_token_cookie(&auth.access_token);
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::new(StatusCode::OK, "Login successful", auth)),
    ))
}

/// Handler for POST /api/v1/auth/logout
/// Idempotent: logging out twice returns success both times
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Invalid or expired token"),
        (status = 403, description = "No credential presented")
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn logout_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<
    (
        StatusCode,
        [(header::HeaderName, String); 1],
        Json<ApiResponse<serde_json::Value>>,
    ),
    AuthError,
> {
    state.auth_service.logout(user.user_id).await?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cleared_token_cookie())],
        Json(ApiResponse::new(StatusCode::OK, "Logged out successfully", serde_json::Value::Null)),
    ))
}

/// Handler for POST /api/v1/auth/password-reset
#[utoipa::path(
    post,
    path = "/api/v1/auth/password-reset",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Missing old or new password"),
        (status = 401, description = "Old password does not match")
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn password_reset_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<PasswordResetRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AuthError> {
    state
        .auth_service
        .reset_password(
            user.user_id,
            request.old_password.as_deref(),
            request.new_password.as_deref(),
        )
        .await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        "Password changed successfully",
        serde_json::Value::Null,
    )))
}

/// Handler for POST /api/v1/auth/refresh-token
/// Exchanges a verified refresh token for a fresh access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh-token",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token issued", body = AccessTokenResponse),
        (status = 401, description = "Refresh token invalid or expired")
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn refresh_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<AccessTokenResponse>>, AuthError> {
    let access_token = state.auth_service.refresh(&request.token).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        "Access token refreshed",
        AccessTokenResponse { access_token },
    )))
}
