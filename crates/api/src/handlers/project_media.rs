//! Project image and video handlers.
//!
//! Uploads arrive as multipart forms: a `project` text field plus the
//! file under `image` or `video`. The write order is fixed so a crash
//! can only leak an unreferenced file, never a row pointing at nothing:
//! store the new file, mutate the row, then best-effort delete whatever
//! file the row no longer references.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use edifica_core::error::CoreError;
use edifica_core::media::{validate_image_upload, validate_video_upload};
use edifica_core::types::DbId;
use edifica_db::repositories::{ProjectImageRepo, ProjectRepo, ProjectVideoRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::MultipartForm;
use crate::media::{SUBDIR_PROJECT_IMAGES, SUBDIR_PROJECT_VIDEOS};
use crate::middleware::auth::RequireStaff;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for media listing.
#[derive(Debug, Default, Deserialize)]
pub struct MediaListParams {
    /// Restrict to one project's media.
    pub project: Option<DbId>,
}

/// Parse the `project` form field and verify the project exists.
async fn resolve_project(state: &AppState, form: &MultipartForm) -> AppResult<DbId> {
    let project_id: DbId = form
        .require_text("project")?
        .parse()
        .map_err(|_| AppError::BadRequest("Field 'project' must be a numeric id".into()))?;

    if !ProjectRepo::exists(&state.pool, project_id).await? {
        return Err(AppError::Core(CoreError::not_found("Project", project_id)));
    }
    Ok(project_id)
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// GET /api/project-images
pub async fn list_images(
    State(state): State<AppState>,
    Query(params): Query<MediaListParams>,
) -> AppResult<impl IntoResponse> {
    let rows = ProjectImageRepo::list(&state.pool, params.project).await?;
    Ok(ApiResponse::list(rows, None))
}

/// POST /api/project-images (staff, multipart: `project`, `image`)
pub async fn create_image(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = MultipartForm::read(multipart).await?;
    let project_id = resolve_project(&state, &form).await?;

    let upload = form.require_file("image")?;
    validate_image_upload(&upload.filename, upload.bytes.len())?;

    let rel_path = state
        .media
        .save(SUBDIR_PROJECT_IMAGES, &upload.filename, &upload.bytes)
        .await?;

    let row = match ProjectImageRepo::create(&state.pool, project_id, &rel_path).await {
        Ok(row) => row,
        Err(e) => {
            // The insert failed; don't leave the stored file orphaned.
            state.media.delete(&rel_path).await;
            return Err(e.into());
        }
    };

    tracing::info!(image_id = row.id, project_id, user_id = user.user_id, "Project image uploaded");
    Ok(ApiResponse::created(row))
}

/// PUT /api/project-images/{id} (staff, multipart: `image`)
///
/// Replace the stored file; the row keeps its identity.
pub async fn replace_image(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let previous = ProjectImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project image", id)))?;

    let form = MultipartForm::read(multipart).await?;
    let upload = form.require_file("image")?;
    validate_image_upload(&upload.filename, upload.bytes.len())?;

    let rel_path = state
        .media
        .save(SUBDIR_PROJECT_IMAGES, &upload.filename, &upload.bytes)
        .await?;

    let row = match ProjectImageRepo::update_file_path(&state.pool, id, &rel_path).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            state.media.delete(&rel_path).await;
            return Err(AppError::Core(CoreError::not_found("Project image", id)));
        }
        Err(e) => {
            state.media.delete(&rel_path).await;
            return Err(e.into());
        }
    };

    state.media.delete(&previous.file_path).await;
    tracing::info!(image_id = id, user_id = user.user_id, "Project image replaced");
    Ok(ApiResponse::ok(row))
}

/// DELETE /api/project-images/{id} (staff)
pub async fn delete_image(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let file_path = ProjectImageRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project image", id)))?;

    state.media.delete(&file_path).await;
    tracing::info!(image_id = id, user_id = user.user_id, "Project image deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

/// GET /api/project-videos
pub async fn list_videos(
    State(state): State<AppState>,
    Query(params): Query<MediaListParams>,
) -> AppResult<impl IntoResponse> {
    let rows = ProjectVideoRepo::list(&state.pool, params.project).await?;
    Ok(ApiResponse::list(rows, None))
}

/// POST /api/project-videos (staff, multipart: `project`, `video`)
pub async fn create_video(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = MultipartForm::read(multipart).await?;
    let project_id = resolve_project(&state, &form).await?;

    let upload = form.require_file("video")?;
    validate_video_upload(&upload.filename, upload.bytes.len())?;

    let rel_path = state
        .media
        .save(SUBDIR_PROJECT_VIDEOS, &upload.filename, &upload.bytes)
        .await?;

    let row = match ProjectVideoRepo::create(&state.pool, project_id, &rel_path).await {
        Ok(row) => row,
        Err(e) => {
            state.media.delete(&rel_path).await;
            return Err(e.into());
        }
    };

    tracing::info!(video_id = row.id, project_id, user_id = user.user_id, "Project video uploaded");
    Ok(ApiResponse::created(row))
}

/// PUT /api/project-videos/{id} (staff, multipart: `video`)
pub async fn replace_video(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let previous = ProjectVideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project video", id)))?;

    let form = MultipartForm::read(multipart).await?;
    let upload = form.require_file("video")?;
    validate_video_upload(&upload.filename, upload.bytes.len())?;

    let rel_path = state
        .media
        .save(SUBDIR_PROJECT_VIDEOS, &upload.filename, &upload.bytes)
        .await?;

    let row = match ProjectVideoRepo::update_file_path(&state.pool, id, &rel_path).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            state.media.delete(&rel_path).await;
            return Err(AppError::Core(CoreError::not_found("Project video", id)));
        }
        Err(e) => {
            state.media.delete(&rel_path).await;
            return Err(e.into());
        }
    };

    state.media.delete(&previous.file_path).await;
    tracing::info!(video_id = id, user_id = user.user_id, "Project video replaced");
    Ok(ApiResponse::ok(row))
}

/// DELETE /api/project-videos/{id} (staff)
pub async fn delete_video(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let file_path = ProjectVideoRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project video", id)))?;

    state.media.delete(&file_path).await;
    tracing::info!(video_id = id, user_id = user.user_id, "Project video deleted");
    Ok(StatusCode::NO_CONTENT)
}
