//! Company info singleton model and update DTO.
//!
//! The `company_info` table holds at most one row (id = 1). There is no
//! create DTO: the row is created lazily with empty defaults on first
//! read via `CompanyInfoRepo::get_or_create`.

use edifica_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The singleton row from the `company_info` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompanyInfo {
    pub id: DbId,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub whatsapp: String,
}

/// DTO for partially updating the singleton row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompanyInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub whatsapp: Option<String>,
}
