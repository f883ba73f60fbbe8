//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod about_us;
pub mod category;
pub mod client_logo;
pub mod company_info;
pub mod contact_message;
pub mod project;
pub mod project_media;
pub mod service;
pub mod user;
