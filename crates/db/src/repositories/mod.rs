//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod about_us_repo;
pub mod category_repo;
pub mod client_logo_repo;
pub mod company_info_repo;
pub mod contact_message_repo;
pub mod project_image_repo;
pub mod project_repo;
pub mod project_video_repo;
pub mod service_repo;
pub mod user_repo;

pub use about_us_repo::AboutUsRepo;
pub use category_repo::CategoryRepo;
pub use client_logo_repo::ClientLogoRepo;
pub use company_info_repo::CompanyInfoRepo;
pub use contact_message_repo::ContactMessageRepo;
pub use project_image_repo::ProjectImageRepo;
pub use project_repo::ProjectRepo;
pub use project_video_repo::ProjectVideoRepo;
pub use service_repo::ServiceRepo;
pub use user_repo::UserRepo;
