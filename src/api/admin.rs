use std::sync::atomic::Ordering;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;

use crate::AppState;
use crate::api::{ApiError, db_error, error};
use crate::models::user::User;

pub async fn readiness() -> &'static str {
    "OK"
}

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    let hits = state.hits.load(Ordering::Relaxed);
    Html(format!(
        "<html>\n<body>\n\t<h1>Welcome, Chirpy Admin</h1>\n\t<p>Chirpy has been visited {} times!</p>\n</body>\n</html>",
        hits
    ))
}

/// Wipe all users (and their chirps and refresh tokens, via cascade).
/// Refused outside the dev platform.
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    if state.platform != "dev" {
        return Err(error(StatusCode::FORBIDDEN, "Forbidden"));
    }

    User::reset(&state.pool).await.map_err(db_error)?;
    Ok(StatusCode::OK)
}
