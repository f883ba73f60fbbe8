//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, is_staff, created_at";

/// Provides account lookup and creation for the auth gate.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new user with a pre-hashed password.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
        is_staff: bool,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, is_staff)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(password_hash)
            .bind(is_staff)
            .fetch_one(pool)
            .await
    }
}
