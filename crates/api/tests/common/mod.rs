//! Shared helpers for API integration tests.
//!
//! Each test gets the production router wired to a fresh sqlx test
//! database and a temporary media root, with the notifier disabled so
//! no SMTP traffic ever leaves a test.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use edifica_api::auth::jwt::{generate_access_token, JwtConfig};
use edifica_api::config::ServerConfig;
use edifica_api::media::MediaStore;
use edifica_api::notify::ContactNotifier;
use edifica_api::router::build_app_router;
use edifica_api::state::AppState;

/// The application under test plus the handles its state borrows from.
pub struct TestApp {
    pub router: Router,
    pub media_root: tempfile::TempDir,
    config: ServerConfig,
}

/// Build a [`TestApp`] around a sqlx test pool.
pub fn spawn_app(pool: edifica_db::DbPool) -> TestApp {
    let media_root = tempfile::tempdir().expect("create media tempdir");

    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
        request_timeout_secs: 30,
        media_root: media_root.path().to_path_buf(),
        jwt: JwtConfig {
            secret: "integration-test-secret".into(),
            access_token_expiry_mins: 60,
        },
        email: None,
    };

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media: Arc::new(MediaStore::new(media_root.path())),
        notifier: Arc::new(ContactNotifier::disabled()),
    };

    TestApp {
        router: build_app_router(state, &config),
        media_root,
        config,
    }
}

impl TestApp {
    /// A signed token for a staff user.
    pub fn staff_token(&self) -> String {
        generate_access_token(1, true, &self.config.jwt).expect("token generation")
    }

    /// A signed token for a non-staff user.
    pub fn user_token(&self) -> String {
        generate_access_token(2, false, &self.config.jwt).expect("token generation")
    }

    /// Send a request through the router without binding a socket.
    pub async fn request(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.expect("router call")
    }

    pub async fn get(&self, path: &str) -> Response<Body> {
        self.request(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("request build"),
        )
        .await
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Response<Body> {
        self.request(
            Request::builder()
                .uri(path)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request build"),
        )
        .await
    }

    pub async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: serde_json::Value,
        token: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.request(
            builder
                .body(Body::from(body.to_string()))
                .expect("request build"),
        )
        .await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(Method::DELETE).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.request(builder.body(Body::empty()).expect("request build"))
            .await
    }

    /// Send a multipart form built with [`MultipartBody`].
    pub async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        form: MultipartBody,
        token: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(path).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", form.boundary),
        );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.request(
            builder
                .body(Body::from(form.finish()))
                .expect("request build"),
        )
        .await
    }
}

/// Hand-rolled multipart body, enough for the upload endpoints.
pub struct MultipartBody {
    boundary: &'static str,
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "test-boundary-7f2a9c",
            buf: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.buf
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Assert the standard error envelope: `status`, `code`, and the fixed
/// message for the status class.
pub async fn assert_error_envelope(response: Response<Body>, status: StatusCode) {
    assert_eq!(response.status(), status);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], status.as_u16());
    assert!(body["message"].is_string());
    assert!(!body["message"].as_str().unwrap().is_empty());
}
