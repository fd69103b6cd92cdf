use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::api::{ApiError, auth_error};
use crate::models::user::User;

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
    #[serde(default)]
    expires_in_seconds: Option<i64>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    user: User,
    token: String,
    refresh_token: String,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // 0 or absent means the one-hour default.
    let ttl = payload
        .expires_in_seconds
        .filter(|&secs| secs > 0)
        .map(Duration::seconds);

    let session = state
        .sessions
        .login(&payload.email, &payload.password, ttl)
        .await
        .map_err(auth_error)?;

    Ok(Json(LoginResponse {
        user: session.user,
        token: session.access_token,
        refresh_token: session.refresh_token,
    }))
}

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, ApiError> {
    let token = state.sessions.refresh(&headers).await.map_err(auth_error)?;
    Ok(Json(RefreshResponse { token }))
}

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state.sessions.revoke(&headers).await.map_err(auth_error)?;
    Ok(StatusCode::NO_CONTENT)
}
