//! Client logo handlers.
//!
//! Create and update accept multipart forms because they carry the logo
//! file; the text fields ride alongside it. Reads are public, writes
//! are staff-only.

use axum::extract::{Multipart, Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use edifica_core::error::CoreError;
use edifica_core::media::validate_image_upload;
use edifica_core::types::DbId;
use edifica_db::models::client_logo::{CreateClientLogo, UpdateClientLogo};
use edifica_db::repositories::ClientLogoRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::MultipartForm;
use crate::media::SUBDIR_CLIENT_LOGOS;
use crate::middleware::auth::RequireStaff;
use crate::query::PageParams;
use crate::response::{ApiResponse, PageMeta};
use crate::state::AppState;

/// Parse an optional `sort_order` text field.
fn parse_sort_order(form: &MultipartForm) -> AppResult<Option<i32>> {
    form.texts
        .get("sort_order")
        .map(|raw| {
            raw.parse()
                .map_err(|_| AppError::BadRequest("Field 'sort_order' must be an integer".into()))
        })
        .transpose()
}

/// GET /api/company/clients
pub async fn list_client_logos(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
    RawQuery(query): RawQuery,
) -> AppResult<impl IntoResponse> {
    if page.disabled() {
        let rows = ClientLogoRepo::list(&state.pool, i64::MAX, 0).await?;
        return Ok(ApiResponse::list(rows, None));
    }

    let w = page.window();
    let total = ClientLogoRepo::count(&state.pool).await?;
    let rows = ClientLogoRepo::list(&state.pool, w.limit, w.offset).await?;

    let meta = PageMeta::new(
        "/api/company/clients",
        query.as_deref(),
        w.page,
        w.page_size,
        total,
    );
    Ok(ApiResponse::list(rows, Some(meta)))
}

/// POST /api/company/clients (staff, multipart: `name`, `logo`, optional `sort_order`)
pub async fn create_client_logo(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = MultipartForm::read(multipart).await?;
    let name = form.require_text("name")?.to_string();
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Client name must not be empty".into(),
        )));
    }
    let sort_order = parse_sort_order(&form)?.unwrap_or(0);

    let upload = form.require_file("logo")?;
    validate_image_upload(&upload.filename, upload.bytes.len())?;

    let file_path = state
        .media
        .save(SUBDIR_CLIENT_LOGOS, &upload.filename, &upload.bytes)
        .await?;

    let input = CreateClientLogo {
        name,
        file_path: file_path.clone(),
        sort_order,
    };
    let logo = match ClientLogoRepo::create(&state.pool, &input).await {
        Ok(logo) => logo,
        Err(e) => {
            state.media.delete(&file_path).await;
            return Err(e.into());
        }
    };

    tracing::info!(logo_id = logo.id, user_id = user.user_id, "Client logo created");
    Ok(ApiResponse::created(logo))
}

/// GET /api/company/clients/{id}
pub async fn get_client_logo(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let logo = ClientLogoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Client logo", id)))?;

    Ok(ApiResponse::ok(logo))
}

/// PATCH /api/company/clients/{id} (staff, multipart; all parts optional)
pub async fn update_client_logo(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let previous = ClientLogoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Client logo", id)))?;

    let form = MultipartForm::read(multipart).await?;
    let name = form.texts.get("name").cloned();
    if matches!(&name, Some(n) if n.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Client name must not be empty".into(),
        )));
    }

    let mut new_path = None;
    if let Some(upload) = form.files.get("logo") {
        validate_image_upload(&upload.filename, upload.bytes.len())?;
        new_path = Some(
            state
                .media
                .save(SUBDIR_CLIENT_LOGOS, &upload.filename, &upload.bytes)
                .await?,
        );
    }

    let input = UpdateClientLogo {
        name,
        file_path: new_path.clone(),
        sort_order: parse_sort_order(&form)?,
    };

    let logo = match ClientLogoRepo::update(&state.pool, id, &input).await {
        Ok(Some(logo)) => logo,
        Ok(None) => {
            if let Some(path) = &new_path {
                state.media.delete(path).await;
            }
            return Err(AppError::Core(CoreError::not_found("Client logo", id)));
        }
        Err(e) => {
            if let Some(path) = &new_path {
                state.media.delete(path).await;
            }
            return Err(e.into());
        }
    };

    // The row now points at the replacement; drop the old file.
    if new_path.is_some() {
        state.media.delete(&previous.file_path).await;
    }

    tracing::info!(logo_id = id, user_id = user.user_id, "Client logo updated");
    Ok(ApiResponse::ok(logo))
}

/// DELETE /api/company/clients/{id} (staff)
pub async fn delete_client_logo(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let file_path = ClientLogoRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Client logo", id)))?;

    state.media.delete(&file_path).await;
    tracing::info!(logo_id = id, user_id = user.user_id, "Client logo deleted");
    Ok(StatusCode::NO_CONTENT)
}
