//! Project status vocabulary and field validation.

use crate::error::CoreError;

/// Status of a project still under construction.
pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// Status of a delivered project.
pub const STATUS_DELIVERED: &str = "delivered";

/// Valid project status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_IN_PROGRESS, STATUS_DELIVERED];

/// Validate that `status` is a known project status.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate a project name prior to slug generation.
///
/// The slug generator requires a non-empty name; a name with no
/// alphanumeric content would produce an empty slug.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Project name must not be empty".into()));
    }
    if !name.chars().any(|c| c.is_alphanumeric()) {
        return Err(CoreError::Validation(
            "Project name must contain at least one letter or digit".into(),
        ));
    }
    Ok(())
}
