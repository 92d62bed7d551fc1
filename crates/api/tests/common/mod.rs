#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use recolour_api::config::{ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
use recolour_api::router::build_app_router;
use recolour_api::state::AppState;

pub const MANAGER: &str = "manager";
pub const OPERATOR: &str = "operator";
pub const PARTNER_ALPHA: &str = "partner:Studio Alpha";
pub const PARTNER_BETA: &str = "partner:Studio Beta";

/// Build a test `ServerConfig` with safe defaults.
///
/// Assets and uploads live under `assets_dir`, and demo seeding is off so
/// each test starts from an empty store.
pub fn test_config(assets_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        assets_path: assets_dir.to_path_buf(),
        uploads_path: assets_dir.join("uploads"),
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        seed_demo_data: false,
    }
}

/// The application router plus the temporary directory backing its assets.
///
/// Keep the whole struct alive for the duration of a test; dropping it
/// removes the directory.
pub struct TestApp {
    pub router: Router,
    pub dir: TempDir,
}

impl TestApp {
    pub fn uploads_path(&self) -> std::path::PathBuf {
        self.dir.path().join("uploads")
    }
}

/// Build the full application router with all middleware layers.
///
/// Uses the same [`build_app_router`] as `main.rs`, so integration tests
/// exercise the production middleware stack.
pub fn build_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let state = AppState::new(config.clone());
    TestApp {
        router: build_app_router(state, &config),
        dir,
    }
}

/// Same as [`build_test_app`] but with the demo tickets loaded.
pub fn build_seeded_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.seed_demo_data = true;
    let state = AppState::new(config.clone());
    TestApp {
        router: build_app_router(state, &config),
        dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str, auth: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, auth, None).await
}

pub async fn post(app: &TestApp, uri: &str, auth: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(auth), None).await
}

pub async fn post_json(app: &TestApp, uri: &str, auth: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(auth), Some(body)).await
}

pub async fn put_json(app: &TestApp, uri: &str, auth: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(auth), Some(body)).await
}

pub async fn delete(app: &TestApp, uri: &str, auth: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(auth), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn photo(id: &str) -> Value {
    json!({
        "id": id,
        "label": id,
        "fileName": format!("{id}.jpg"),
        "thumbnailUrl": format!("/api/assets/thumbnails/{id}.jpg"),
        "imageUrl": format!("/api/assets/images/{id}.jpg"),
    })
}

pub fn create_body(partner: &str, priority: &str) -> Value {
    json!({
        "style": "Granita - solid",
        "priority": priority,
        "partner": partner,
        "instructions": ["Keep clipping path"],
        "referencePhotos": [photo("15370100_001")],
    })
}

/// Create a ticket as the operator and return its id.
pub async fn create_ticket(app: &TestApp, partner: &str, priority: &str) -> String {
    let response = post_json(app, "/api/tickets", OPERATOR, create_body(partner, priority)).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Walk a fresh Studio Alpha ticket through to In Progress.
pub async fn in_progress_ticket(app: &TestApp) -> String {
    let id = create_ticket(app, "Studio Alpha", "Medium").await;
    for (path, auth) in [
        ("send", OPERATOR),
        ("receipt", PARTNER_ALPHA),
        ("start", PARTNER_ALPHA),
    ] {
        let response = post(app, &format!("/api/tickets/{id}/{path}"), auth).await;
        assert_eq!(response.status(), axum::http::StatusCode::OK, "{path} failed");
    }
    id
}
