//! Contact form handlers.
//!
//! The create endpoint is the only public write in the API. It
//! validates every field, persists the message, and hands it to the
//! notifier; email delivery is fire-and-forget and can never fail the
//! request.

use axum::extract::{Path, Query, RawQuery, State};
use axum::response::IntoResponse;
use axum::Json;
use edifica_core::contact::validate_contact;
use edifica_core::error::CoreError;
use edifica_core::types::DbId;
use edifica_db::models::contact_message::{
    ContactQuery, CreateContactMessage, UpdateContactStatus,
};
use edifica_db::repositories::ContactMessageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireStaff;
use crate::query::PageParams;
use crate::response::{ApiResponse, PageMeta};
use crate::state::AppState;

/// POST /api/contact (public)
pub async fn create_message(
    State(state): State<AppState>,
    Json(input): Json<CreateContactMessage>,
) -> AppResult<impl IntoResponse> {
    let errors = validate_contact(
        &input.first_name,
        &input.last_name,
        &input.email,
        &input.phone,
        &input.subject,
        &input.message,
    );
    if !errors.is_empty() {
        return Err(AppError::Fields(errors));
    }

    let message = ContactMessageRepo::create(&state.pool, &input).await?;
    tracing::info!(message_id = message.id, "Contact message received");

    state.notifier.notify(message.clone());

    Ok(ApiResponse::created(message))
}

/// GET /api/contact (staff)
pub async fn list_messages(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ContactQuery>,
    Query(page): Query<PageParams>,
    RawQuery(query): RawQuery,
) -> AppResult<impl IntoResponse> {
    if page.disabled() {
        let rows = ContactMessageRepo::search(&state.pool, &params, i64::MAX, 0).await?;
        return Ok(ApiResponse::list(rows, None));
    }

    let w = page.window();
    let total = ContactMessageRepo::count(&state.pool, &params).await?;
    let rows = ContactMessageRepo::search(&state.pool, &params, w.limit, w.offset).await?;

    let meta = PageMeta::new("/api/contact", query.as_deref(), w.page, w.page_size, total);
    Ok(ApiResponse::list(rows, Some(meta)))
}

/// GET /api/contact/{id} (staff)
pub async fn get_message(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = ContactMessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Contact message", id)))?;

    Ok(ApiResponse::ok(message))
}

/// PATCH /api/contact/{id} (staff)
///
/// The read flag is the only mutable field; everything else is frozen
/// at creation.
pub async fn update_message(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContactStatus>,
) -> AppResult<impl IntoResponse> {
    let message = ContactMessageRepo::set_read(&state.pool, id, input.is_read)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Contact message", id)))?;

    tracing::info!(
        message_id = id,
        is_read = input.is_read,
        user_id = user.user_id,
        "Contact message read flag updated"
    );
    Ok(ApiResponse::ok(message))
}
