//! Repository for the `services` table.

use edifica_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::{CreateService, Service, ServiceQuery, UpdateService};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, icon_path, created_at";

/// Provides CRUD operations for services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a new service, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateService) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services (title, description, icon_path)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon_path)
            .fetch_one(pool)
            .await
    }

    /// Find a service by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List services matching `params`, newest first, paginated.
    pub async fn search(
        pool: &PgPool,
        params: &ServiceQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services
             WHERE ($1::TEXT IS NULL OR title = $1)
               AND ($2::TEXT IS NULL OR title ILIKE $2 OR description ILIKE $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(&params.title)
            .bind(params.search.as_ref().map(|s| format!("%{s}%")))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count services matching `params` (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &ServiceQuery) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM services
             WHERE ($1::TEXT IS NULL OR title = $1)
               AND ($2::TEXT IS NULL OR title ILIKE $2 OR description ILIKE $2)",
        )
        .bind(&params.title)
        .bind(params.search.as_ref().map(|s| format!("%{s}%")))
        .fetch_one(pool)
        .await
    }

    /// Update a service. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                icon_path = COALESCE($4, icon_path)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon_path)
            .fetch_optional(pool)
            .await
    }

    /// Delete a service row, returning the icon path it owned (if any)
    /// so the caller can clean up storage. The outer `None` means the
    /// row did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Option<String>>, sqlx::Error> {
        sqlx::query_scalar("DELETE FROM services WHERE id = $1 RETURNING icon_path")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
