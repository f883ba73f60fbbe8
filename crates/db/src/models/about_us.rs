//! About-us singleton model and update DTO.
//!
//! Like `company_info`, the `about_us` table holds at most one row
//! (id = 1), created lazily on first read. The row owns at most one
//! stored image file.

use edifica_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// The singleton row from the `about_us` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AboutUs {
    pub id: DbId,
    pub description: String,
    pub image_path: Option<String>,
}

/// DTO for partially updating the singleton row, built from multipart
/// form parts.
///
/// `image_path` is set by the handler after storing an uploaded file;
/// `clear_image` is set when the update carries the `delete_image`
/// directive. The two are mutually exclusive at the call site.
#[derive(Debug, Clone, Default)]
pub struct UpdateAboutUs {
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub clear_image: bool,
}
