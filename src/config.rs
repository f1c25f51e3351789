// Application configuration
// All environment access happens here, once, at process start.
// The resulting Config value is carried in AppState instead of being
// re-read from ambient globals by downstream code.

/// Process-wide configuration loaded at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string (required)
    pub database_url: String,
    /// Secret used to sign and verify JWTs (required)
    pub jwt_secret: String,
    /// Bind host, defaults to 0.0.0.0
    pub host: String,
    /// Bind port, defaults to 8080
    pub port: String,
    /// Request body size cap in bytes; oversized payloads yield 413
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Panics when DATABASE_URL or JWT_SECRET is missing; the process
    /// must not come up without them.
    pub fn from_env() -> Self {
        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
        let jwt_secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment");
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let max_body_bytes = std::env::var("MAX_BODY_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(65_536);

        Self {
            database_url,
            jwt_secret,
            host,
            port,
            max_body_bytes,
        }
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
