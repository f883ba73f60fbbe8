//! Project entity model and DTOs.

use edifica_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::project_media::{ProjectImage, ProjectVideo};

/// A project row from the `projects` table, joined with its category
/// name for read responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    /// Derived from `name` at creation; immutable afterwards.
    pub slug: String,
    pub category_id: DbId,
    pub category_name: String,
    pub location: String,
    pub description: String,
    pub year: Option<i32>,
    pub service_type: Option<String>,
    pub levels: Option<String>,
    pub area: Option<String>,
    pub status: String,
    pub extra_info: Option<serde_json::Value>,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project together with its media rows, returned by the detail
/// endpoint.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub images: Vec<ProjectImage>,
    pub videos: Vec<ProjectVideo>,
}

/// DTO for creating a new project. The slug is always generated
/// server-side and cannot be supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub category_id: DbId,
    pub location: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub service_type: Option<String>,
    pub levels: Option<String>,
    pub area: Option<String>,
    /// Defaults to `in_progress` if omitted.
    pub status: Option<String>,
    pub extra_info: Option<serde_json::Value>,
    pub is_featured: Option<bool>,
}

/// DTO for updating an existing project. All fields are optional; the
/// slug is never updated, even when the name changes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub category_id: Option<DbId>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub service_type: Option<String>,
    pub levels: Option<String>,
    pub area: Option<String>,
    pub status: Option<String>,
    pub extra_info: Option<serde_json::Value>,
    pub is_featured: Option<bool>,
}

/// Filter, search, and ordering parameters for project listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectQuery {
    /// Filter by category id.
    pub category: Option<DbId>,
    /// Filter by status value.
    pub status: Option<String>,
    /// Filter by service type (exact match).
    pub service_type: Option<String>,
    /// Filter by featured flag.
    pub is_featured: Option<bool>,
    /// Filter by year.
    pub year: Option<i32>,
    /// Free-text search over name, location, service_type, area,
    /// status, and description.
    pub search: Option<String>,
    /// Ordering field: `created_at`, `name`, or `year`, with a leading
    /// `-` for descending. Defaults to `-created_at`.
    pub ordering: Option<String>,
}
