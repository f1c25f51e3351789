// Authentication module
// Credential and token lifecycle: signup, login, logout, password reset,
// token refresh, and the request-authentication gate.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{
    login_handler, logout_handler, password_reset_handler, refresh_handler, signup_handler,
};
pub use middleware::AuthenticatedUser;
pub use models::{
    AccessTokenResponse, AuthResponse, LoginRequest, PasswordResetRequest, RefreshRequest,
    SignupRequest, User, UserResponse,
};
pub use repository::UserRepository;
pub use service::AuthService;
pub use token::TokenService;
