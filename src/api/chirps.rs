use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::api::{ApiError, auth_error, db_error, error};
use crate::models::chirp::Chirp;

const MAX_CHIRP_LENGTH: usize = 140;
const BANNED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

#[derive(Deserialize)]
pub struct ChirpRequest {
    body: String,
}

/// Replace banned words (whole words only, case-insensitive) with `****`.
fn clean_profanity(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if BANNED_WORDS.contains(&word.to_lowercase().as_str()) {
                "****"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn create_chirp(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChirpRequest>,
) -> Result<(StatusCode, Json<Chirp>), ApiError> {
    let subject = state
        .sessions
        .authorize_bearer(&headers)
        .await
        .map_err(auth_error)?;

    if payload.body.len() > MAX_CHIRP_LENGTH {
        return Err(error(StatusCode::BAD_REQUEST, "Chirp is too long"));
    }

    let cleaned = clean_profanity(&payload.body);
    let chirp = Chirp::create(&state.pool, &cleaned, subject)
        .await
        .map_err(db_error)?;

    Ok((StatusCode::CREATED, Json(chirp)))
}

pub async fn get_chirps(State(state): State<AppState>) -> Result<Json<Vec<Chirp>>, ApiError> {
    let chirps = Chirp::all(&state.pool).await.map_err(db_error)?;
    Ok(Json(chirps))
}

pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<Uuid>,
) -> Result<Json<Chirp>, ApiError> {
    let chirp = Chirp::find(&state.pool, chirp_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Chirp not found"))?;

    Ok(Json(chirp))
}

/// Only the owning subject may delete a chirp: anyone else gets a 403,
/// which is distinct from the 401 an unauthenticated caller receives.
pub async fn delete_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let subject = state
        .sessions
        .authorize_bearer(&headers)
        .await
        .map_err(auth_error)?;

    let chirp = Chirp::find(&state.pool, chirp_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Chirp not found"))?;

    if chirp.user_id != subject {
        return Err(error(StatusCode::FORBIDDEN, "Forbidden"));
    }

    Chirp::delete(&state.pool, chirp_id).await.map_err(db_error)?;
    Ok(StatusCode::NO_CONTENT)
}
