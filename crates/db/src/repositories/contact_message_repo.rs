//! Repository for the `contact_messages` table.
//!
//! Messages are immutable after creation except for the read flag;
//! there is deliberately no general update or delete method.

use edifica_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact_message::{ContactMessage, ContactQuery, CreateContactMessage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, first_name, last_name, email, phone, subject, message, is_read, created_at";

/// Ordering fields exposed on the list endpoint.
fn order_clause(ordering: Option<&str>) -> &'static str {
    match ordering {
        Some("created_at") => "created_at ASC",
        Some("-created_at") | None => "created_at DESC",
        Some("email") => "email ASC",
        Some("-email") => "email DESC",
        Some(_) => "created_at DESC",
    }
}

/// Provides operations for contact messages.
pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Insert a new contact message, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages
                (first_name, last_name, email, phone, subject, message)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.subject)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Find a message by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_messages WHERE id = $1");
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List messages matching `params`, paginated.
    pub async fn search(
        pool: &PgPool,
        params: &ContactQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let order = order_clause(params.ordering.as_deref());
        let query = format!(
            "SELECT {COLUMNS} FROM contact_messages
             WHERE ($1::BOOLEAN IS NULL OR is_read = $1)
               AND ($2::TEXT IS NULL OR email = $2)
               AND ($3::TEXT IS NULL OR first_name ILIKE $3 OR last_name ILIKE $3
                    OR email ILIKE $3 OR subject ILIKE $3 OR message ILIKE $3)
             ORDER BY {order}
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(params.is_read)
            .bind(&params.email)
            .bind(params.search.as_ref().map(|s| format!("%{s}%")))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count messages matching `params` (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &ContactQuery) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM contact_messages
             WHERE ($1::BOOLEAN IS NULL OR is_read = $1)
               AND ($2::TEXT IS NULL OR email = $2)
               AND ($3::TEXT IS NULL OR first_name ILIKE $3 OR last_name ILIKE $3
                    OR email ILIKE $3 OR subject ILIKE $3 OR message ILIKE $3)",
        )
        .bind(params.is_read)
        .bind(&params.email)
        .bind(params.search.as_ref().map(|s| format!("%{s}%")))
        .fetch_one(pool)
        .await
    }

    /// Set the read flag. The only mutation allowed after creation.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_read(
        pool: &PgPool,
        id: DbId,
        is_read: bool,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_messages SET is_read = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .bind(is_read)
            .fetch_optional(pool)
            .await
    }
}
