mod auth;
mod config;
mod db;
mod extract;
mod response;
mod tasks;
mod validation;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use auth::{repository::UserRepository, service::AuthService, token::TokenService};
use config::Config;
use tasks::{repository::TaskRepository, service::TaskService};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::signup_handler,
        auth::handlers::login_handler,
        auth::handlers::logout_handler,
        auth::handlers::password_reset_handler,
        auth::handlers::refresh_handler,
        tasks::handlers::create_task_handler,
        tasks::handlers::today_tasks_handler,
        tasks::handlers::done_tasks_handler,
        tasks::handlers::upcoming_tasks_handler,
        tasks::handlers::overdue_tasks_handler,
        tasks::handlers::mark_done_handler,
        tasks::handlers::update_task_handler,
        tasks::handlers::delete_task_handler,
    ),
    components(
        schemas(
            auth::models::SignupRequest,
            auth::models::LoginRequest,
            auth::models::PasswordResetRequest,
            auth::models::RefreshRequest,
            auth::models::UserResponse,
            auth::models::AuthResponse,
            auth::models::AccessTokenResponse,
            tasks::models::Task,
            tasks::models::TaskRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Account lifecycle and token endpoints"),
        (name = "todos", description = "Owner-scoped task endpoints")
    ),
    info(
        title = "Task List API",
        version = "1.0.0",
        description = "Multi-tenant to-do list API with JWT authentication"
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
    }
}

/// Application state shared across handlers.
/// Built once at startup from the explicit Config; nothing downstream
/// reads ambient environment state.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub token_service: TokenService,
    pub user_repo: UserRepository,
    pub auth_service: AuthService,
    pub task_service: TaskService,
}

impl AppState {
    /// Wire repositories and services around a pool and config
    pub fn new(db: PgPool, config: &Config) -> Self {
        let token_service = TokenService::new(config.jwt_secret.clone());
        let user_repo = UserRepository::new(db.clone());
        let auth_service = AuthService::new(user_repo.clone(), token_service.clone());
        let task_service = TaskService::new(TaskRepository::new(db.clone()));

        Self {
            db,
            token_service,
            user_repo,
            auth_service,
            task_service,
        }
    }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS and a body
/// size cap (oversized payloads yield 413)
pub fn create_router(db: PgPool, config: &Config) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let state = AppState::new(db, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Account lifecycle
        .route("/api/v1/auth/signup", post(auth::signup_handler))
        .route("/api/v1/auth/login", post(auth::login_handler))
        .route("/api/v1/auth/logout", post(auth::logout_handler))
        .route("/api/v1/auth/password-reset", post(auth::password_reset_handler))
        .route("/api/v1/auth/refresh-token", post(auth::refresh_handler))
        // Tasks
        .route("/api/v1/todos", post(tasks::create_task_handler))
        .route("/api/v1/todos/today", get(tasks::today_tasks_handler))
        .route("/api/v1/todos/done", get(tasks::done_tasks_handler))
        .route("/api/v1/todos/upcoming", get(tasks::upcoming_tasks_handler))
        .route("/api/v1/todos/overdue", get(tasks::overdue_tasks_handler))
        .route("/api/v1/todos/:id/done", patch(tasks::mark_done_handler))
        .route(
            "/api/v1/todos/:id",
            put(tasks::update_task_handler).delete(tasks::delete_task_handler),
        )
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Task List API - Starting...");

    // Load configuration once; missing DATABASE_URL/JWT_SECRET is fatal
    let config = Config::from_env();

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router
    let app = create_router(db_pool, &config);

    // Start the Axum server
    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Task List API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

#[cfg(test)]
mod tests;
