//! Singleton company-info and about-us handlers.
//!
//! Both resources are single-row tables created lazily on first read,
//! so GET never 404s. About-us accepts a multipart PATCH carrying an
//! optional replacement image or the `delete_image` directive.

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use edifica_core::media::validate_image_upload;
use edifica_db::models::about_us::UpdateAboutUs;
use edifica_db::models::company_info::UpdateCompanyInfo;
use edifica_db::repositories::{AboutUsRepo, CompanyInfoRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::MultipartForm;
use crate::media::SUBDIR_ABOUT;
use crate::middleware::auth::RequireStaff;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/company/info
///
/// Lazily creates the row with empty defaults on first read.
pub async fn get_company_info(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let info = CompanyInfoRepo::get_or_create(&state.pool).await?;
    Ok(ApiResponse::ok(info))
}

/// PATCH /api/company/info (staff, JSON)
pub async fn update_company_info(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<UpdateCompanyInfo>,
) -> AppResult<impl IntoResponse> {
    let info = CompanyInfoRepo::update(&state.pool, &input).await?;
    tracing::info!(user_id = user.user_id, "Company info updated");
    Ok(ApiResponse::ok(info))
}

/// GET /api/company/about
pub async fn get_about(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let about = AboutUsRepo::get_or_create(&state.pool).await?;
    Ok(ApiResponse::ok(about))
}

/// PATCH /api/company/about (staff, multipart)
///
/// Parts, all optional: `description` text, `image` file, and the
/// `delete_image` directive whose literal value `"true"` clears the
/// stored image. Sending both an image and the directive is rejected.
pub async fn update_about(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = MultipartForm::read(multipart).await?;

    let clear_image = form
        .texts
        .get("delete_image")
        .is_some_and(|v| v == "true");
    let upload = form.files.get("image");

    if clear_image && upload.is_some() {
        return Err(AppError::BadRequest(
            "Cannot upload an image and delete_image in the same request".into(),
        ));
    }

    let mut image_path = None;
    if let Some(upload) = upload {
        validate_image_upload(&upload.filename, upload.bytes.len())?;
        image_path = Some(
            state
                .media
                .save(SUBDIR_ABOUT, &upload.filename, &upload.bytes)
                .await?,
        );
    }

    let input = UpdateAboutUs {
        description: form.texts.get("description").cloned(),
        image_path: image_path.clone(),
        clear_image,
    };

    let (about, previous_image) = match AboutUsRepo::update(&state.pool, &input).await {
        Ok(result) => result,
        Err(e) => {
            if let Some(path) = &image_path {
                state.media.delete(path).await;
            }
            return Err(e.into());
        }
    };

    // The old file is unreferenced once the row stops pointing at it.
    if image_path.is_some() || clear_image {
        if let Some(old) = &previous_image {
            state.media.delete(old).await;
        }
    }

    tracing::info!(user_id = user.user_id, cleared = clear_image, "About-us updated");
    Ok(ApiResponse::ok(about))
}
