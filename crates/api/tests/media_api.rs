//! End-to-end tests for media upload, replacement, and cleanup.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use common::{assert_error_envelope, body_json, spawn_app, MultipartBody, TestApp};

async fn seed_project(app: &TestApp) -> i64 {
    let response = app
        .send_json(
            Method::POST,
            "/api/categories",
            json!({ "name": "Residential" }),
            Some(&app.staff_token()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let category = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .send_json(
            Method::POST,
            "/api/projects",
            json!({ "name": "Con Media", "category_id": category, "location": "Asunción" }),
            Some(&app.staff_token()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

fn stored_file_exists(app: &TestApp, rel_path: &str) -> bool {
    app.media_root.path().join(rel_path).exists()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_stores_file_and_row(pool: PgPool) {
    let app = spawn_app(pool);
    let project = seed_project(&app).await;

    let form = MultipartBody::new()
        .text("project", &project.to_string())
        .file("image", "fachada.jpg", b"jpeg-bytes");
    let response = app
        .send_multipart(
            Method::POST,
            "/api/project-images",
            form,
            Some(&app.staff_token()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;

    let rel_path = body["data"]["file_path"].as_str().unwrap().to_string();
    assert!(rel_path.starts_with("projects/images/"));
    assert!(rel_path.ends_with(".jpg"));
    assert!(stored_file_exists(&app, &rel_path));

    let response = app.get(&format!("/api/project-images?project={project}")).await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn replace_swaps_the_stored_file(pool: PgPool) {
    let app = spawn_app(pool);
    let project = seed_project(&app).await;

    let form = MultipartBody::new()
        .text("project", &project.to_string())
        .file("image", "antes.png", b"old-bytes");
    let response = app
        .send_multipart(
            Method::POST,
            "/api/project-images",
            form,
            Some(&app.staff_token()),
        )
        .await;
    let body = body_json(response).await;
    let image_id = body["data"]["id"].as_i64().unwrap();
    let old_path = body["data"]["file_path"].as_str().unwrap().to_string();

    let form = MultipartBody::new().file("image", "despues.webp", b"new-bytes");
    let response = app
        .send_multipart(
            Method::PUT,
            &format!("/api/project-images/{image_id}"),
            form,
            Some(&app.staff_token()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let new_path = body["data"]["file_path"].as_str().unwrap().to_string();

    assert_ne!(old_path, new_path);
    assert!(!stored_file_exists(&app, &old_path));
    assert!(stored_file_exists(&app, &new_path));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_removes_row_and_file(pool: PgPool) {
    let app = spawn_app(pool);
    let project = seed_project(&app).await;

    let form = MultipartBody::new()
        .text("project", &project.to_string())
        .file("video", "recorrido.mp4", b"mp4-bytes");
    let response = app
        .send_multipart(
            Method::POST,
            "/api/project-videos",
            form,
            Some(&app.staff_token()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let video_id = body["data"]["id"].as_i64().unwrap();
    let rel_path = body["data"]["file_path"].as_str().unwrap().to_string();
    assert!(stored_file_exists(&app, &rel_path));

    let response = app
        .delete(
            &format!("/api/project-videos/{video_id}"),
            Some(&app.staff_token()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!stored_file_exists(&app, &rel_path));

    let response = app.get(&format!("/api/project-videos?project={project}")).await;
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn row_delete_survives_missing_file(pool: PgPool) {
    let app = spawn_app(pool);
    let project = seed_project(&app).await;

    let form = MultipartBody::new()
        .text("project", &project.to_string())
        .file("image", "huerfana.jpg", b"bytes");
    let response = app
        .send_multipart(
            Method::POST,
            "/api/project-images",
            form,
            Some(&app.staff_token()),
        )
        .await;
    let body = body_json(response).await;
    let image_id = body["data"]["id"].as_i64().unwrap();
    let rel_path = body["data"]["file_path"].as_str().unwrap().to_string();

    // The stored file disappears out from under the row.
    std::fs::remove_file(app.media_root.path().join(&rel_path)).unwrap();

    let response = app
        .delete(
            &format!("/api/project-images/{image_id}"),
            Some(&app.staff_token()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get(&format!("/api/project-images?project={project}")).await;
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn project_delete_survives_missing_media_file(pool: PgPool) {
    let app = spawn_app(pool);
    let project = seed_project(&app).await;

    let mut paths = Vec::new();
    for name in ["uno.jpg", "dos.jpg"] {
        let form = MultipartBody::new()
            .text("project", &project.to_string())
            .file("image", name, b"bytes");
        let response = app
            .send_multipart(
                Method::POST,
                "/api/project-images",
                form,
                Some(&app.staff_token()),
            )
            .await;
        let body = body_json(response).await;
        paths.push(body["data"]["file_path"].as_str().unwrap().to_string());
    }

    // One of the two files is already gone from storage.
    std::fs::remove_file(app.media_root.path().join(&paths[0])).unwrap();

    let response = app
        .delete("/api/projects/con-media", Some(&app.staff_token()))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get("/api/projects/con-media").await;
    assert_error_envelope(response, StatusCode::NOT_FOUND).await;
    assert!(!stored_file_exists(&app, &paths[1]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_extension_is_rejected_before_storage(pool: PgPool) {
    let app = spawn_app(pool);
    let project = seed_project(&app).await;

    let form = MultipartBody::new()
        .text("project", &project.to_string())
        .file("image", "documento.pdf", b"not-an-image");
    let response = app
        .send_multipart(
            Method::POST,
            "/api/project-images",
            form,
            Some(&app.staff_token()),
        )
        .await;
    assert_error_envelope(response, StatusCode::BAD_REQUEST).await;

    let response = app.get(&format!("/api/project-images?project={project}")).await;
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_for_missing_project_is_404(pool: PgPool) {
    let app = spawn_app(pool);

    let form = MultipartBody::new()
        .text("project", "9999")
        .file("image", "foto.jpg", b"bytes");
    let response = app
        .send_multipart(
            Method::POST,
            "/api/project-images",
            form,
            Some(&app.staff_token()),
        )
        .await;
    assert_error_envelope(response, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_project_cleans_up_media_files(pool: PgPool) {
    let app = spawn_app(pool);
    let project = seed_project(&app).await;

    let mut paths = Vec::new();
    for name in ["uno.jpg", "dos.jpg"] {
        let form = MultipartBody::new()
            .text("project", &project.to_string())
            .file("image", name, b"bytes");
        let response = app
            .send_multipart(
                Method::POST,
                "/api/project-images",
                form,
                Some(&app.staff_token()),
            )
            .await;
        let body = body_json(response).await;
        paths.push(body["data"]["file_path"].as_str().unwrap().to_string());
    }

    let response = app
        .delete("/api/projects/con-media", Some(&app.staff_token()))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for path in &paths {
        assert!(!stored_file_exists(&app, path), "file {path} should be gone");
    }
}
