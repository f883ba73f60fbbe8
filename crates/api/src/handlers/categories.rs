//! Category CRUD handlers.
//!
//! Deleting a category cascades to its projects and their media rows in
//! the database; the handler collects every affected file path up front
//! so storage can be cleaned after the cascade commits.

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use edifica_core::error::CoreError;
use edifica_core::types::DbId;
use edifica_db::models::category::{CreateCategory, UpdateCategory};
use edifica_db::repositories::{
    CategoryRepo, ProjectImageRepo, ProjectRepo, ProjectVideoRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireStaff;
use crate::query::PageParams;
use crate::response::{ApiResponse, PageMeta};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
    RawQuery(query): RawQuery,
) -> AppResult<impl IntoResponse> {
    if page.disabled() {
        let rows = CategoryRepo::list(&state.pool, i64::MAX, 0).await?;
        return Ok(ApiResponse::list(rows, None));
    }

    let w = page.window();
    let total = CategoryRepo::count(&state.pool).await?;
    let rows = CategoryRepo::list(&state.pool, w.limit, w.offset).await?;

    let meta = PageMeta::new("/api/categories", query.as_deref(), w.page, w.page_size, total);
    Ok(ApiResponse::list(rows, Some(meta)))
}

/// POST /api/categories (staff)
pub async fn create_category(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Category name must not be empty".into(),
        )));
    }

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, user_id = user.user_id, "Category created");

    Ok(ApiResponse::created(category))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", id)))?;

    Ok(ApiResponse::ok(category))
}

/// PATCH /api/categories/{id} (staff)
pub async fn update_category(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if matches!(&input.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Category name must not be empty".into(),
        )));
    }

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", id)))?;

    tracing::info!(category_id = id, user_id = user.user_id, "Category updated");
    Ok(ApiResponse::ok(category))
}

/// DELETE /api/categories/{id} (staff)
///
/// Media file paths are collected before the delete: the row cascade
/// removes image and video rows, after which the paths are the only
/// remaining reference to the stored files.
pub async fn delete_category(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut paths = Vec::new();
    for project_id in ProjectRepo::ids_in_category(&state.pool, id).await? {
        paths.extend(ProjectImageRepo::paths_for_project(&state.pool, project_id).await?);
        paths.extend(ProjectVideoRepo::paths_for_project(&state.pool, project_id).await?);
    }

    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Category", id)));
    }

    state.media.delete_all(&paths).await;
    tracing::info!(
        category_id = id,
        user_id = user.user_id,
        files_removed = paths.len(),
        "Category deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
