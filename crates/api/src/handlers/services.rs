//! Service catalog handlers.
//!
//! A service's icon is optional: create and update accept multipart
//! forms with an `icon` file part that may be absent.

use axum::extract::{Multipart, Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use edifica_core::error::CoreError;
use edifica_core::media::validate_image_upload;
use edifica_core::types::DbId;
use edifica_db::models::service::{CreateService, ServiceQuery, UpdateService};
use edifica_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::MultipartForm;
use crate::media::SUBDIR_SERVICE_ICONS;
use crate::middleware::auth::RequireStaff;
use crate::query::PageParams;
use crate::response::{ApiResponse, PageMeta};
use crate::state::AppState;

/// GET /api/company/services
pub async fn list_services(
    State(state): State<AppState>,
    Query(params): Query<ServiceQuery>,
    Query(page): Query<PageParams>,
    RawQuery(query): RawQuery,
) -> AppResult<impl IntoResponse> {
    if page.disabled() {
        let rows = ServiceRepo::search(&state.pool, &params, i64::MAX, 0).await?;
        return Ok(ApiResponse::list(rows, None));
    }

    let w = page.window();
    let total = ServiceRepo::count(&state.pool, &params).await?;
    let rows = ServiceRepo::search(&state.pool, &params, w.limit, w.offset).await?;

    let meta = PageMeta::new(
        "/api/company/services",
        query.as_deref(),
        w.page,
        w.page_size,
        total,
    );
    Ok(ApiResponse::list(rows, Some(meta)))
}

/// POST /api/company/services (staff, multipart: `title`, `description`, optional `icon`)
pub async fn create_service(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = MultipartForm::read(multipart).await?;
    let title = form.require_text("title")?.to_string();
    let description = form.require_text("description")?.to_string();
    if title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Service title must not be empty".into(),
        )));
    }

    let mut icon_path = None;
    if let Some(upload) = form.files.get("icon") {
        validate_image_upload(&upload.filename, upload.bytes.len())?;
        icon_path = Some(
            state
                .media
                .save(SUBDIR_SERVICE_ICONS, &upload.filename, &upload.bytes)
                .await?,
        );
    }

    let input = CreateService {
        title,
        description,
        icon_path: icon_path.clone(),
    };
    let service = match ServiceRepo::create(&state.pool, &input).await {
        Ok(service) => service,
        Err(e) => {
            if let Some(path) = &icon_path {
                state.media.delete(path).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(service_id = service.id, user_id = user.user_id, "Service created");
    Ok(ApiResponse::created(service))
}

/// GET /api/company/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Service", id)))?;

    Ok(ApiResponse::ok(service))
}

/// PATCH /api/company/services/{id} (staff, multipart; all parts optional)
pub async fn update_service(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let previous = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Service", id)))?;

    let form = MultipartForm::read(multipart).await?;
    let title = form.texts.get("title").cloned();
    if matches!(&title, Some(t) if t.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Service title must not be empty".into(),
        )));
    }

    let mut new_icon = None;
    if let Some(upload) = form.files.get("icon") {
        validate_image_upload(&upload.filename, upload.bytes.len())?;
        new_icon = Some(
            state
                .media
                .save(SUBDIR_SERVICE_ICONS, &upload.filename, &upload.bytes)
                .await?,
        );
    }

    let input = UpdateService {
        title,
        description: form.texts.get("description").cloned(),
        icon_path: new_icon.clone(),
    };

    let service = match ServiceRepo::update(&state.pool, id, &input).await {
        Ok(Some(service)) => service,
        Ok(None) => {
            if let Some(path) = &new_icon {
                state.media.delete(path).await;
            }
            return Err(AppError::Core(CoreError::not_found("Service", id)));
        }
        Err(e) => {
            if let Some(path) = &new_icon {
                state.media.delete(path).await;
            }
            return Err(e.into());
        }
    };

    if new_icon.is_some() {
        if let Some(old) = &previous.icon_path {
            state.media.delete(old).await;
        }
    }

    tracing::info!(service_id = id, user_id = user.user_id, "Service updated");
    Ok(ApiResponse::ok(service))
}

/// DELETE /api/company/services/{id} (staff)
pub async fn delete_service(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let icon_path = ServiceRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Service", id)))?;

    if let Some(path) = icon_path {
        state.media.delete(&path).await;
    }
    tracing::info!(service_id = id, user_id = user.user_id, "Service deleted");
    Ok(StatusCode::NO_CONTENT)
}
