//! End-to-end tests for the project and category endpoints.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use common::{assert_error_envelope, body_json, spawn_app};

async fn seed_category(app: &common::TestApp, name: &str) -> i64 {
    let response = app
        .send_json(
            Method::POST,
            "/api/categories",
            json!({ "name": name }),
            Some(&app.staff_token()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_fetch_project(pool: PgPool) {
    let app = spawn_app(pool);
    let category = seed_category(&app, "Residential").await;

    let response = app
        .send_json(
            Method::POST,
            "/api/projects",
            json!({
                "name": "Torre Norte",
                "category_id": category,
                "location": "Asunción",
                "year": 2024,
                "is_featured": true
            }),
            Some(&app.staff_token()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["code"], 201);
    assert_eq!(body["data"]["slug"], "torre-norte");
    assert_eq!(body["data"]["status"], "in_progress");
    assert_eq!(body["data"]["category_name"], "Residential");

    let response = app.get("/api/projects/torre-norte").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Torre Norte");
    assert!(body["data"]["images"].as_array().unwrap().is_empty());
    assert!(body["data"]["videos"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_is_paginated_with_meta(pool: PgPool) {
    let app = spawn_app(pool);
    let category = seed_category(&app, "Residential").await;

    for i in 0..12 {
        let response = app
            .send_json(
                Method::POST,
                "/api/projects",
                json!({
                    "name": format!("Obra {i}"),
                    "category_id": category,
                    "location": "Asunción"
                }),
                Some(&app.staff_token()),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.get("/api/projects?page=1&page_size=5").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["meta"]["total_records"], 12);
    assert_eq!(body["meta"]["total_pages"], 3);
    assert_eq!(body["meta"]["next"], "/api/projects?page=2&page_size=5");
    assert_eq!(body["meta"]["previous"], serde_json::Value::Null);

    // Active filters survive into the page links, so following `next`
    // stays on the filtered result set.
    let response = app
        .get(&format!(
            "/api/projects?category={category}&ordering=name&page=1&page_size=5"
        ))
        .await;
    let body = body_json(response).await;
    assert_eq!(
        body["meta"]["next"],
        format!("/api/projects?category={category}&ordering=name&page=2&page_size=5")
    );

    // no_page returns everything with no meta block.
    let response = app.get("/api/projects?no_page=true").await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 12);
    assert_eq!(body["meta"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn writes_require_staff(pool: PgPool) {
    let app = spawn_app(pool);

    let payload = json!({ "name": "X", "category_id": 1, "location": "Y" });

    let anonymous = app
        .send_json(Method::POST, "/api/projects", payload.clone(), None)
        .await;
    assert_error_envelope(anonymous, StatusCode::UNAUTHORIZED).await;

    let non_staff = app
        .send_json(
            Method::POST,
            "/api/projects",
            payload,
            Some(&app.user_token()),
        )
        .await;
    assert_error_envelope(non_staff, StatusCode::FORBIDDEN).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_status_is_rejected(pool: PgPool) {
    let app = spawn_app(pool);
    let category = seed_category(&app, "Residential").await;

    let response = app
        .send_json(
            Method::POST,
            "/api/projects",
            json!({
                "name": "Torre",
                "category_id": category,
                "location": "Asunción",
                "status": "finished"
            }),
            Some(&app.staff_token()),
        )
        .await;
    assert_error_envelope(response, StatusCode::BAD_REQUEST).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_slug_is_a_404_envelope(pool: PgPool) {
    let app = spawn_app(pool);
    let response = app.get("/api/projects/no-such-slug").await;
    assert_error_envelope(response, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unmatched_method_is_a_405_envelope(pool: PgPool) {
    let app = spawn_app(pool);
    let response = app.delete("/api/projects", Some(&app.staff_token())).await;
    assert_error_envelope(response, StatusCode::METHOD_NOT_ALLOWED).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unmatched_path_is_a_404_envelope(pool: PgPool) {
    let app = spawn_app(pool);
    let response = app.get("/api/no-such-resource").await;
    assert_error_envelope(response, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_category_is_a_409_envelope(pool: PgPool) {
    let app = spawn_app(pool);
    seed_category(&app, "Residential").await;

    let response = app
        .send_json(
            Method::POST,
            "/api/categories",
            json!({ "name": "Residential" }),
            Some(&app.staff_token()),
        )
        .await;
    assert_error_envelope(response, StatusCode::CONFLICT).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn patch_keeps_slug_and_updates_fields(pool: PgPool) {
    let app = spawn_app(pool);
    let category = seed_category(&app, "Residential").await;

    let response = app
        .send_json(
            Method::POST,
            "/api/projects",
            json!({ "name": "Torre Norte", "category_id": category, "location": "Asunción" }),
            Some(&app.staff_token()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .send_json(
            Method::PATCH,
            "/api/projects/torre-norte",
            json!({ "name": "Torre Sur", "status": "delivered" }),
            Some(&app.staff_token()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Torre Sur");
    assert_eq!(body["data"]["slug"], "torre-norte");
    assert_eq!(body["data"]["status"], "delivered");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_project_returns_no_content(pool: PgPool) {
    let app = spawn_app(pool);
    let category = seed_category(&app, "Residential").await;

    app.send_json(
        Method::POST,
        "/api/projects",
        json!({ "name": "Efímera", "category_id": category, "location": "Luque" }),
        Some(&app.staff_token()),
    )
    .await;

    let response = app
        .delete("/api/projects/efimera", Some(&app.staff_token()))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get("/api/projects/efimera").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
