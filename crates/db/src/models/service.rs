//! Service entity model and DTOs.

use edifica_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `services` table. Owns at most one stored icon file.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub icon_path: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a service.
#[derive(Debug, Clone)]
pub struct CreateService {
    pub title: String,
    pub description: String,
    pub icon_path: Option<String>,
}

/// DTO for updating a service, built from multipart form parts.
/// `icon_path` of `Some` means the icon file was replaced.
#[derive(Debug, Clone, Default)]
pub struct UpdateService {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon_path: Option<String>,
}

/// Filter and search parameters for service listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceQuery {
    /// Filter by exact title.
    pub title: Option<String>,
    /// Free-text search over title and description.
    pub search: Option<String>,
}
