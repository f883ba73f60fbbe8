//! Repository for the `client_logos` table.

use edifica_core::types::DbId;
use sqlx::PgPool;

use crate::models::client_logo::{ClientLogo, CreateClientLogo, UpdateClientLogo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, file_path, sort_order, created_at";

/// Provides CRUD operations for client logos.
pub struct ClientLogoRepo;

impl ClientLogoRepo {
    /// Insert a new client logo, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateClientLogo,
    ) -> Result<ClientLogo, sqlx::Error> {
        let query = format!(
            "INSERT INTO client_logos (name, file_path, sort_order)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientLogo>(&query)
            .bind(&input.name)
            .bind(&input.file_path)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a client logo by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ClientLogo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM client_logos WHERE id = $1");
        sqlx::query_as::<_, ClientLogo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List client logos in display order, paginated.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ClientLogo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_logos
             ORDER BY sort_order, id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ClientLogo>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of client logos (for pagination metadata).
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM client_logos")
            .fetch_one(pool)
            .await
    }

    /// Update a client logo. Only non-`None` fields in `input` are
    /// applied. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClientLogo,
    ) -> Result<Option<ClientLogo>, sqlx::Error> {
        let query = format!(
            "UPDATE client_logos SET
                name = COALESCE($2, name),
                file_path = COALESCE($3, file_path),
                sort_order = COALESCE($4, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientLogo>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.file_path)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a client logo row, returning the stored file path it
    /// owned so the caller can clean up storage.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("DELETE FROM client_logos WHERE id = $1 RETURNING file_path")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
