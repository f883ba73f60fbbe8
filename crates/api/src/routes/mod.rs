pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                 login (public)
///
/// /projects                   list (public), create (staff)
/// /projects/{slug}            get (public), update, delete (staff)
///
/// /categories                 list (public), create (staff)
/// /categories/{id}            get (public), update, delete (staff)
///
/// /project-images             list (public), upload (staff, multipart)
/// /project-images/{id}        replace (PUT, multipart), delete (staff)
/// /project-videos             same shape as images
/// /project-videos/{id}
///
/// /company/info               get (public, lazy-create), update (staff)
/// /company/about              get (public, lazy-create), update (staff, multipart)
/// /company/clients            list (public), create (staff, multipart)
/// /company/clients/{id}       get, update (multipart), delete
/// /company/services           list (public, ?title=&search=), create (staff, multipart)
/// /company/services/{id}      get, update (multipart), delete
///
/// /contact                    submit (public), list (staff)
/// /contact/{id}               get, set read flag (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth.
        .route("/auth/login", post(handlers::auth::login))
        // Projects.
        .route(
            "/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/projects/{slug}",
            get(handlers::projects::get_project)
                .patch(handlers::projects::update_project)
                .delete(handlers::projects::delete_project),
        )
        // Categories.
        .route(
            "/categories",
            get(handlers::categories::list_categories).post(handlers::categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(handlers::categories::get_category)
                .patch(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        // Project media.
        .route(
            "/project-images",
            get(handlers::project_media::list_images).post(handlers::project_media::create_image),
        )
        .route(
            "/project-images/{id}",
            put(handlers::project_media::replace_image)
                .delete(handlers::project_media::delete_image),
        )
        .route(
            "/project-videos",
            get(handlers::project_media::list_videos).post(handlers::project_media::create_video),
        )
        .route(
            "/project-videos/{id}",
            put(handlers::project_media::replace_video)
                .delete(handlers::project_media::delete_video),
        )
        // Company singletons.
        .route(
            "/company/info",
            get(handlers::company::get_company_info).patch(handlers::company::update_company_info),
        )
        .route(
            "/company/about",
            get(handlers::company::get_about).patch(handlers::company::update_about),
        )
        // Client logos.
        .route(
            "/company/clients",
            get(handlers::clients::list_client_logos)
                .post(handlers::clients::create_client_logo),
        )
        .route(
            "/company/clients/{id}",
            get(handlers::clients::get_client_logo)
                .patch(handlers::clients::update_client_logo)
                .delete(handlers::clients::delete_client_logo),
        )
        // Services.
        .route(
            "/company/services",
            get(handlers::services::list_services).post(handlers::services::create_service),
        )
        .route(
            "/company/services/{id}",
            get(handlers::services::get_service)
                .patch(handlers::services::update_service)
                .delete(handlers::services::delete_service),
        )
        // Contact form.
        .route(
            "/contact",
            post(handlers::contact::create_message).get(handlers::contact::list_messages),
        )
        .route(
            "/contact/{id}",
            get(handlers::contact::get_message).patch(handlers::contact::update_message),
        )
}
