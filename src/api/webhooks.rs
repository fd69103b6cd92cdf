use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::api::{ApiError, auth_error, db_error, error};
use crate::models::user::User;

#[derive(Deserialize)]
pub struct WebhookEvent {
    event: String,
    data: WebhookData,
}

#[derive(Deserialize)]
pub struct WebhookData {
    user_id: Uuid,
}

/// Polka payment webhook. Guarded by the shared ApiKey; events other than
/// `user.upgraded` are acknowledged and ignored.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<WebhookEvent>,
) -> Result<StatusCode, ApiError> {
    state.sessions.authorize_api_key(&headers).map_err(auth_error)?;

    if payload.event != "user.upgraded" {
        return Ok(StatusCode::NO_CONTENT);
    }

    let affected = User::upgrade_to_chirpy_red(&state.pool, payload.data.user_id)
        .await
        .map_err(db_error)?;
    if affected == 0 {
        return Err(error(StatusCode::NOT_FOUND, "User not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
