use axum::http::StatusCode;
use serde_json::{Value, json};

use super::helpers::{create_test_app, login_user, register_user, setup_test_db, test_request};

#[tokio::test]
async fn register_returns_profile_without_password_hash() {
    let pool = setup_test_db().await;
    let app = create_test_app(pool);

    let user = register_user(&app, "walt@example.com", "123456").await;

    assert_eq!(user["email"], "walt@example.com");
    assert_eq!(user["is_chirpy_red"], false);
    assert!(user.get("id").is_some());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn update_requires_a_bearer_token() {
    let pool = setup_test_db().await;
    let app = create_test_app(pool);

    let (status, _) = test_request(
        app,
        "PUT",
        "/api/users",
        Some(json!({ "email": "new@example.com", "password": "new" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_changes_email_and_password() {
    let pool = setup_test_db().await;
    let app = create_test_app(pool);

    register_user(&app, "walt@example.com", "123456").await;
    let login = login_user(&app, "walt@example.com", "123456").await;
    let bearer = format!("Bearer {}", login["token"].as_str().unwrap());

    let (status, body) = test_request(
        app.clone(),
        "PUT",
        "/api/users",
        Some(json!({ "email": "heisenberg@example.com", "password": "bluesky" })),
        Some(&bearer),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(updated["email"], "heisenberg@example.com");
    assert_eq!(updated["id"], login["id"]);

    // Old credentials no longer work, new ones do
    let (status, _) = test_request(
        app.clone(),
        "POST",
        "/api/login",
        Some(json!({ "email": "walt@example.com", "password": "123456" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    login_user(&app, "heisenberg@example.com", "bluesky").await;
}
