//! Repository for the `project_images` table.
//!
//! Rows reference stored files but never touch them; deletes return the
//! orphaned path so the caller can run storage cleanup after the row
//! change has committed.

use edifica_core::types::DbId;
use sqlx::PgPool;

use crate::models::project_media::ProjectImage;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, file_path, created_at";

/// Provides CRUD operations for project images.
pub struct ProjectImageRepo;

impl ProjectImageRepo {
    /// Insert a new image row for a project.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        file_path: &str,
    ) -> Result<ProjectImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_images (project_id, file_path)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .bind(file_path)
            .fetch_one(pool)
            .await
    }

    /// Find an image row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_images WHERE id = $1");
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List image rows, optionally restricted to one project.
    pub async fn list(
        pool: &PgPool,
        project_id: Option<DbId>,
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_images
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Point an image row at a replacement file.
    ///
    /// Returns `None` if no row with the given `id` exists. The caller
    /// deletes the previous file only after this update has succeeded.
    pub async fn update_file_path(
        pool: &PgPool,
        id: DbId,
        file_path: &str,
    ) -> Result<Option<ProjectImage>, sqlx::Error> {
        let query = format!(
            "UPDATE project_images SET file_path = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(id)
            .bind(file_path)
            .fetch_optional(pool)
            .await
    }

    /// Delete an image row, returning the stored file path it owned so
    /// the caller can clean up storage. `None` if the row did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("DELETE FROM project_images WHERE id = $1 RETURNING file_path")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// File paths of every image belonging to a project. Collected
    /// before a project delete so the cascade doesn't orphan storage.
    pub async fn paths_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT file_path FROM project_images WHERE project_id = $1")
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
