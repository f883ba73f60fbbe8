//! Error-envelope fallbacks for responses produced by the router
//! itself rather than by a handler.
//!
//! Axum answers unmatched methods with a bare 405 and unmatched paths
//! go to the router fallback; both are rewritten here so every error
//! the API emits carries the same JSON envelope.

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::error_body;

/// Router fallback for unmatched paths.
pub async fn not_found() -> Response {
    let status = StatusCode::NOT_FOUND;
    let body = error_body(status, json!({ "detail": "Resource not found" }));
    (status, axum::Json(body)).into_response()
}

/// Rewrite bare 405 responses into the error envelope, keeping the
/// `Allow` header the method router set.
pub async fn method_not_allowed(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();

    let status = StatusCode::METHOD_NOT_ALLOWED;
    let body = error_body(status, json!({ "detail": "Method not allowed" }));
    let mut rewritten = (status, axum::Json(body)).into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}
