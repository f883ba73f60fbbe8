//! Application-level error handling and the error response envelope.
//!
//! Every error leaving a handler is rendered as
//! `{"status": "error", "code", "message", "errors"}` where `message`
//! is a fixed human-readable string chosen by status class and the
//! detail lives under `errors`. Internal detail reaches the caller only
//! in the generic 500 case, nested under `errors`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use edifica_core::contact::FieldError;
use edifica_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the project's error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `edifica_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable detail message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Per-field validation failures, surfaced verbatim under `errors`.
    #[error("Field validation failed")]
    Fields(Vec<FieldError>),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Fixed user-facing message for each status class.
pub fn fixed_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "The submitted data is not valid.",
        StatusCode::UNAUTHORIZED => "You are not authorized. Please log in.",
        StatusCode::FORBIDDEN => "You do not have permission to perform this action.",
        StatusCode::NOT_FOUND => "The requested resource was not found.",
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this resource.",
        StatusCode::CONFLICT => "The request conflicts with the current state.",
        _ => "An unexpected server error occurred.",
    }
}

/// Build the error envelope for a status and detail payload.
pub fn error_body(status: StatusCode, errors: serde_json::Value) -> serde_json::Value {
    json!({
        "status": "error",
        "code": status.as_u16(),
        "message": fixed_message(status),
        "errors": errors,
    })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, json!({ "detail": msg }))
                }
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    json!({ "detail": format!("{entity} '{id}' not found") }),
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "detail": msg })),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, json!({ "detail": msg }))
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({ "detail": msg })),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, json!(msg))
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "detail": msg })),
            AppError::Fields(fields) => {
                let mut map = serde_json::Map::new();
                for f in fields {
                    map.entry(f.field)
                        .or_insert_with(|| json!([]))
                        .as_array_mut()
                        .expect("field errors are arrays")
                        .push(json!(f.message));
                }
                (StatusCode::BAD_REQUEST, serde_json::Value::Object(map))
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!(msg))
            }
        };

        let body = error_body(status, errors);
        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and detail payload.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized detail.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, serde_json::Value) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            json!({ "detail": "Resource not found" }),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        json!({
                            "detail":
                                format!("Duplicate value violates unique constraint: {constraint}")
                        }),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!("An internal database error occurred"),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!("An internal database error occurred"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_messages_by_status_class() {
        assert_eq!(
            fixed_message(StatusCode::NOT_FOUND),
            "The requested resource was not found."
        );
        assert_eq!(
            fixed_message(StatusCode::INTERNAL_SERVER_ERROR),
            "An unexpected server error occurred."
        );
    }

    #[test]
    fn field_errors_group_by_field() {
        let err = AppError::Fields(vec![
            FieldError {
                field: "email",
                message: "Enter a valid email address.".into(),
            },
            FieldError {
                field: "email",
                message: "Too long.".into(),
            },
            FieldError {
                field: "message",
                message: "This field may not be blank.".into(),
            },
        ]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
