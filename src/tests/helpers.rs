use std::sync::Once;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;
use tracing::Level;

use crate::config::Config;
use crate::{AppState, create_router};

pub const TEST_SIGNING_KEY: &str = "test-signing-key";
pub const TEST_POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

static INIT: Once = Once::new();

/// Initialize logging exactly once
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_target(false)
            .with_max_level(Level::ERROR)
            .init();
    });
}

pub async fn setup_test_db() -> SqlitePool {
    init_tracing();

    // A single connection so every query sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_state(pool: SqlitePool, platform: &str) -> AppState {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        signing_key: TEST_SIGNING_KEY.to_string(),
        polka_key: TEST_POLKA_KEY.to_string(),
        platform: platform.to_string(),
    };
    AppState::new(pool, &config)
}

pub fn create_test_app(pool: SqlitePool) -> Router {
    create_router(test_state(pool, "dev"))
}

pub async fn test_request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    authorization: Option<&str>,
) -> (StatusCode, String) {
    let body = if let Some(json) = body {
        Body::from(serde_json::to_string(&json).unwrap())
    } else {
        Body::empty()
    };

    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(value) = authorization {
        request = request.header("authorization", value);
    }

    let request = request.body(body).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = String::from_utf8(
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();

    (status, body)
}

/// Register a user and return the created profile.
pub async fn register_user(app: &Router, email: &str, password: &str) -> Value {
    let (status, body) = test_request(
        app.clone(),
        "POST",
        "/api/users",
        Some(json!({ "email": email, "password": password })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_str(&body).unwrap()
}

/// Log in and return the response body (profile + token pair).
pub async fn login_user(app: &Router, email: &str, password: &str) -> Value {
    let (status, body) = test_request(
        app.clone(),
        "POST",
        "/api/login",
        Some(json!({ "email": email, "password": password })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).unwrap()
}
