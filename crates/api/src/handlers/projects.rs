//! Project CRUD handlers.
//!
//! Projects are addressed by slug everywhere below the list endpoint.
//! The slug is assigned at creation by `ProjectRepo::create` and never
//! changes afterwards, even when the name does.

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use edifica_core::error::CoreError;
use edifica_core::project::{validate_name, validate_status};
use edifica_db::models::project::{CreateProject, ProjectDetail, ProjectQuery, UpdateProject};
use edifica_db::repositories::{CategoryRepo, ProjectImageRepo, ProjectRepo, ProjectVideoRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireStaff;
use crate::query::PageParams;
use crate::response::{ApiResponse, PageMeta};
use crate::state::AppState;

/// GET /api/projects
///
/// Public listing with filters (`category`, `status`, `service_type`,
/// `is_featured`, `year`), free-text `search`, and `ordering`.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectQuery>,
    Query(page): Query<PageParams>,
    RawQuery(query): RawQuery,
) -> AppResult<impl IntoResponse> {
    if page.disabled() {
        let rows = ProjectRepo::search(&state.pool, &params, i64::MAX, 0).await?;
        return Ok(ApiResponse::list(rows, None));
    }

    let w = page.window();
    let total = ProjectRepo::count(&state.pool, &params).await?;
    let rows = ProjectRepo::search(&state.pool, &params, w.limit, w.offset).await?;

    let meta = PageMeta::new("/api/projects", query.as_deref(), w.page, w.page_size, total);
    Ok(ApiResponse::list(rows, Some(meta)))
}

/// POST /api/projects (staff)
pub async fn create_project(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    if CategoryRepo::find_by_id(&state.pool, input.category_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found(
            "Category",
            input.category_id,
        )));
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(
        project_id = project.id,
        slug = %project.slug,
        user_id = user.user_id,
        "Project created"
    );

    Ok(ApiResponse::created(project))
}

/// GET /api/projects/{slug}
///
/// Detail view: the project row plus its image and video rows.
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", &slug)))?;

    let images = ProjectImageRepo::list(&state.pool, Some(project.id)).await?;
    let videos = ProjectVideoRepo::list(&state.pool, Some(project.id)).await?;

    Ok(ApiResponse::ok(ProjectDetail {
        project,
        images,
        videos,
    }))
}

/// PATCH /api/projects/{slug} (staff)
pub async fn update_project(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    if let Some(category_id) = input.category_id {
        if CategoryRepo::find_by_id(&state.pool, category_id)
            .await?
            .is_none()
        {
            return Err(AppError::Core(CoreError::not_found(
                "Category",
                category_id,
            )));
        }
    }

    let project = ProjectRepo::update(&state.pool, &slug, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", &slug)))?;

    tracing::info!(project_id = project.id, slug = %slug, user_id = user.user_id, "Project updated");
    Ok(ApiResponse::ok(project))
}

/// DELETE /api/projects/{slug} (staff)
///
/// Collects the project's media file paths before deleting; the row
/// cascade removes the media rows, then storage is cleaned best-effort.
pub async fn delete_project(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", &slug)))?;

    let mut paths = ProjectImageRepo::paths_for_project(&state.pool, project.id).await?;
    paths.extend(ProjectVideoRepo::paths_for_project(&state.pool, project.id).await?);

    ProjectRepo::delete_by_slug(&state.pool, &slug).await?;
    state.media.delete_all(&paths).await;

    tracing::info!(
        project_id = project.id,
        slug = %slug,
        user_id = user.user_id,
        files_removed = paths.len(),
        "Project deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
