//! Contact message model and DTOs.
//!
//! Rows are immutable after creation except for the `is_read` flag.

use edifica_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for the public contact form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

/// DTO for the staff-only read-flag update. Deliberately carries only
/// `is_read`: every other field is immutable after creation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContactStatus {
    pub is_read: bool,
}

/// Filter, search, and ordering parameters for message listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactQuery {
    /// Filter by read state.
    pub is_read: Option<bool>,
    /// Filter by exact sender email.
    pub email: Option<String>,
    /// Free-text search over names, email, subject, and message body.
    pub search: Option<String>,
    /// Ordering field: `created_at` or `email`, `-` prefix descends.
    pub ordering: Option<String>,
}
