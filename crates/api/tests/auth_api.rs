//! End-to-end tests for login and the token gate.

mod common;

use axum::http::{Method, StatusCode};
use edifica_api::auth::password::hash_password;
use edifica_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

use common::{assert_error_envelope, body_json, spawn_app};

async fn seed_user(pool: &PgPool, username: &str, password: &str, is_staff: bool) {
    let hash = hash_password(password).unwrap();
    UserRepo::create(pool, username, &hash, is_staff)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_a_working_token(pool: PgPool) {
    seed_user(&pool, "admin", "hunter2hunter2", true).await;
    let app = spawn_app(pool);

    let response = app
        .send_json(
            Method::POST,
            "/api/auth/login",
            json!({ "username": "admin", "password": "hunter2hunter2" }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["user"]["username"], "admin");
    // The hash must never be serialized.
    assert_eq!(
        body["data"]["user"]["password_hash"],
        serde_json::Value::Null
    );
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    // The issued token passes the staff gate.
    let response = app
        .send_json(
            Method::POST,
            "/api/categories",
            json!({ "name": "Residential" }),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_and_unknown_user_are_the_same_401(pool: PgPool) {
    seed_user(&pool, "admin", "correct-password", true).await;
    let app = spawn_app(pool);

    let wrong_password = app
        .send_json(
            Method::POST,
            "/api/auth/login",
            json!({ "username": "admin", "password": "wrong" }),
            None,
        )
        .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_body = body_json(wrong_password).await;

    let unknown_user = app
        .send_json(
            Method::POST,
            "/api/auth/login",
            json!({ "username": "ghost", "password": "whatever" }),
            None,
        )
        .await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_body = body_json(unknown_user).await;

    assert_eq!(wrong_body, unknown_body);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_token_is_rejected(pool: PgPool) {
    let app = spawn_app(pool);

    let response = app
        .send_json(
            Method::POST,
            "/api/categories",
            json!({ "name": "X" }),
            Some("not-a-jwt"),
        )
        .await;
    assert_error_envelope(response, StatusCode::UNAUTHORIZED).await;
}
