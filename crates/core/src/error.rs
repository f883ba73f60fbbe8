//! Domain-level error taxonomy.
//!
//! [`CoreError`] is the error type produced by validation and domain
//! logic. The API crate wraps it in its HTTP error type and maps each
//! variant to a status code.

/// Domain error shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input failed validation (maps to 400).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An entity lookup came up empty (maps to 404).
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Human-readable entity name, e.g. `"Project"`.
        entity: &'static str,
        /// The id or slug the lookup used, rendered for the message.
        id: String,
    },

    /// A uniqueness or state conflict (maps to 409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials (maps to 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (maps to 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Anything unexpected (maps to 500, message is logged not shown).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a [`CoreError::NotFound`] from any displayable identifier
    /// (numeric id or slug).
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
