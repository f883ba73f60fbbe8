//! Client logo entity model and DTOs.

use edifica_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `client_logos` table. Owns one stored logo file.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientLogo {
    pub id: DbId,
    pub name: String,
    pub file_path: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a client logo. The file itself arrives as a
/// multipart upload and is stored before the insert.
#[derive(Debug, Clone)]
pub struct CreateClientLogo {
    pub name: String,
    pub file_path: String,
    pub sort_order: i32,
}

/// DTO for updating a client logo, built from multipart form parts.
/// A `file_path` of `Some` means the logo file was replaced.
#[derive(Debug, Clone, Default)]
pub struct UpdateClientLogo {
    pub name: Option<String>,
    pub file_path: Option<String>,
    pub sort_order: Option<i32>,
}
