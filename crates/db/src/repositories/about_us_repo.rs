//! Repository for the `about_us` singleton table.
//!
//! Same singleton discipline as
//! [`CompanyInfoRepo`](crate::repositories::CompanyInfoRepo): one row,
//! id = 1, lazily created, never deleted. The row additionally owns at
//! most one stored image; updates report the previous image path so the
//! API layer can clean up storage after the row change lands.

use sqlx::PgPool;

use crate::models::about_us::{AboutUs, UpdateAboutUs};

/// The only legal id for the singleton row.
const SINGLETON_ID: i64 = 1;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, description, image_path";

/// Provides access to the about-us singleton.
pub struct AboutUsRepo;

impl AboutUsRepo {
    /// Return the singleton row, creating it with empty defaults if it
    /// does not exist yet. Concurrent first creations are serialized by
    /// the primary key; losers silently read the winner's row.
    pub async fn get_or_create(pool: &PgPool) -> Result<AboutUs, sqlx::Error> {
        sqlx::query("INSERT INTO about_us (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(SINGLETON_ID)
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM about_us WHERE id = $1");
        sqlx::query_as::<_, AboutUs>(&query)
            .bind(SINGLETON_ID)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update to the singleton row, creating it first
    /// if necessary.
    ///
    /// Returns the updated row together with the image path it held
    /// before the update, so the caller can delete a replaced or
    /// cleared file once the row state is authoritative.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateAboutUs,
    ) -> Result<(AboutUs, Option<String>), sqlx::Error> {
        let previous = Self::get_or_create(pool).await?;

        // `clear_image` wins over a simultaneous upload; the handler
        // rejects that combination before getting here.
        let query = format!(
            "UPDATE about_us SET
                description = COALESCE($2, description),
                image_path = CASE WHEN $4 THEN NULL ELSE COALESCE($3, image_path) END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, AboutUs>(&query)
            .bind(SINGLETON_ID)
            .bind(&input.description)
            .bind(&input.image_path)
            .bind(input.clear_image)
            .fetch_one(pool)
            .await?;

        Ok((updated, previous.image_path))
    }

    /// Number of rows in the table. Exists for tests asserting the
    /// singleton invariant.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM about_us")
            .fetch_one(pool)
            .await
    }
}
