//! End-to-end tests for the public contact form and its staff-side
//! management endpoints.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use common::{assert_error_envelope, body_json, spawn_app};

fn valid_payload() -> serde_json::Value {
    json!({
        "first_name": "Ana",
        "last_name": "Pérez",
        "email": "ana@example.com",
        "phone": "+595 981 000 000",
        "subject": "Presupuesto",
        "message": "Quisiera un presupuesto para una obra."
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submission_persists_without_smtp(pool: PgPool) {
    let app = spawn_app(pool.clone());

    let response = app
        .send_json(Method::POST, "/api/contact", valid_payload(), None)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["is_read"], false);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn phone_and_subject_are_optional(pool: PgPool) {
    let app = spawn_app(pool);

    let response = app
        .send_json(
            Method::POST,
            "/api/contact",
            json!({
                "first_name": "Luis",
                "last_name": "Gómez",
                "email": "luis@example.com",
                "message": "Hola"
            }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["phone"], "");
    assert_eq!(body["data"]["subject"], "");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_fields_are_reported_per_field(pool: PgPool) {
    let app = spawn_app(pool);

    let response = app
        .send_json(
            Method::POST,
            "/api/contact",
            json!({
                "first_name": "",
                "last_name": "Pérez",
                "email": "not-an-email",
                "message": ""
            }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "The submitted data is not valid.");
    assert!(body["errors"]["first_name"].is_array());
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["message"].is_array());
    assert_eq!(body["errors"]["last_name"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_requires_staff(pool: PgPool) {
    let app = spawn_app(pool);

    let response = app.get("/api/contact").await;
    assert_error_envelope(response, StatusCode::UNAUTHORIZED).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn staff_can_list_filter_and_mark_read(pool: PgPool) {
    let app = spawn_app(pool);

    app.send_json(Method::POST, "/api/contact", valid_payload(), None)
        .await;

    let token = app.staff_token();

    let response = app.get_auth("/api/contact?is_read=false", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    let id = rows[0]["id"].as_i64().unwrap();

    let response = app
        .send_json(
            Method::PATCH,
            &format!("/api/contact/{id}"),
            json!({ "is_read": true }),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["is_read"], true);

    // The unread filter is now empty.
    let response = app.get_auth("/api/contact?is_read=false", &token).await;
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
