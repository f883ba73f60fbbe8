//! Repository for the `company_info` singleton table.
//!
//! At most one row (id = 1) may ever exist. Creation goes through
//! [`CompanyInfoRepo::get_or_create`], which leans on the primary key
//! to serialize concurrent first-creation attempts: the loser's insert
//! becomes a no-op and both callers read the same row. There is no
//! delete operation.

use sqlx::PgPool;

use crate::models::company_info::{CompanyInfo, UpdateCompanyInfo};

/// The only legal id for the singleton row.
const SINGLETON_ID: i64 = 1;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, phone, email, address, facebook, instagram, linkedin, whatsapp";

/// Provides access to the company-info singleton.
pub struct CompanyInfoRepo;

impl CompanyInfoRepo {
    /// Return the singleton row, creating it with empty defaults if it
    /// does not exist yet.
    ///
    /// `ON CONFLICT DO NOTHING` makes a second creation attempt -- or
    /// the loser of a concurrent race -- a silent read of the existing
    /// row, without touching its fields.
    pub async fn get_or_create(pool: &PgPool) -> Result<CompanyInfo, sqlx::Error> {
        sqlx::query("INSERT INTO company_info (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(SINGLETON_ID)
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM company_info WHERE id = $1");
        sqlx::query_as::<_, CompanyInfo>(&query)
            .bind(SINGLETON_ID)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update to the singleton row, creating it first
    /// if necessary.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateCompanyInfo,
    ) -> Result<CompanyInfo, sqlx::Error> {
        // Ensure the row exists so a PATCH before any GET still works.
        Self::get_or_create(pool).await?;

        let query = format!(
            "UPDATE company_info SET
                phone = COALESCE($2, phone),
                email = COALESCE($3, email),
                address = COALESCE($4, address),
                facebook = COALESCE($5, facebook),
                instagram = COALESCE($6, instagram),
                linkedin = COALESCE($7, linkedin),
                whatsapp = COALESCE($8, whatsapp)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompanyInfo>(&query)
            .bind(SINGLETON_ID)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.facebook)
            .bind(&input.instagram)
            .bind(&input.linkedin)
            .bind(&input.whatsapp)
            .fetch_one(pool)
            .await
    }

    /// Number of rows in the table. Exists for tests asserting the
    /// singleton invariant.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM company_info")
            .fetch_one(pool)
            .await
    }
}
