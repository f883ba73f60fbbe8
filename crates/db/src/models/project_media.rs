//! Project image and video rows.
//!
//! Each row owns exactly one stored file, referenced by `file_path`
//! (relative to the media root). File creation and cleanup happen in
//! the API layer; these models only carry the reference.

use edifica_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `project_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectImage {
    pub id: DbId,
    pub project_id: DbId,
    pub file_path: String,
    pub created_at: Timestamp,
}

/// A row from the `project_videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectVideo {
    pub id: DbId,
    pub project_id: DbId,
    pub file_path: String,
    pub created_at: Timestamp,
}
