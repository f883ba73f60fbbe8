//! Domain logic shared by the Edifica CMS backend crates.
//!
//! Pure functions and types only: slug generation, upload validation,
//! the project status vocabulary, contact-form validation, and the
//! shared error and ID types. No I/O lives here.

pub mod contact;
pub mod error;
pub mod media;
pub mod project;
pub mod slug;
pub mod types;
