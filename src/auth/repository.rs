// Database repository for user records

use sqlx::PgPool;

use crate::auth::{error::AuthError, models::User};

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user. The caller passes an already-lowercased username
    /// and an already-hashed password.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, access_token, refresh_token, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    // Constraint name tells us which uniqueness rule tripped
                    return match db_err.constraint() {
                        Some(name) if name.contains("email") => AuthError::EmailTaken,
                        _ => AuthError::UsernameTaken,
                    };
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    /// Find a user by lowercased username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, access_token, refresh_token, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, access_token, refresh_token, created_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if a username is already taken
    pub async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    /// Check if an email is already registered (case-insensitive)
    pub async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    /// Persist a freshly issued token pair on the user record
    pub async fn store_token_pair(
        &self,
        user_id: i32,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), AuthError> {
        sqlx::query("UPDATE users SET access_token = $1, refresh_token = $2 WHERE id = $3")
            .bind(access_token)
            .bind(refresh_token)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Replace only the stored access token (refresh flow; the refresh
    /// token is not rotated)
    pub async fn store_access_token(
        &self,
        user_id: i32,
        access_token: &str,
    ) -> Result<(), AuthError> {
        sqlx::query("UPDATE users SET access_token = $1 WHERE id = $2")
            .bind(access_token)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Null out both stored tokens. Idempotent: clearing an already
    /// logged-out user is not an error.
    pub async fn clear_tokens(&self, user_id: i32) -> Result<(), AuthError> {
        sqlx::query("UPDATE users SET access_token = NULL, refresh_token = NULL WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Replace the stored password hash
    pub async fn update_password_hash(
        &self,
        user_id: i32,
        password_hash: &str,
    ) -> Result<(), AuthError> {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
