use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;

use crate::AppState;
use crate::api::{ApiError, auth_error, db_error, error};
use crate::auth::password;
use crate::models::user::User;

#[derive(Deserialize)]
pub struct UserRequest {
    email: String,
    password: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let password_hash = password::hash_password(&payload.password).map_err(auth_error)?;
    let user = User::create(&state.pool, &payload.email, &password_hash)
        .await
        .map_err(db_error)?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UserRequest>,
) -> Result<Json<User>, ApiError> {
    let subject = state
        .sessions
        .authorize_bearer(&headers)
        .await
        .map_err(auth_error)?;

    let password_hash = password::hash_password(&payload.password).map_err(auth_error)?;
    let user = User::update_credentials(&state.pool, subject, &payload.email, &password_hash)
        .await
        .map_err(db_error)?
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "User not found"))?;

    Ok(Json(user))
}
