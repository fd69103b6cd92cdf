pub mod admin;
pub mod auth;
pub mod chirps;
pub mod users;
pub mod webhooks;

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::auth::AuthError;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

/// Map an auth failure to its response. Credential problems become a bare
/// 401; infrastructure failures are logged here and surface as a generic
/// server error.
pub fn auth_error(err: AuthError) -> ApiError {
    let status = err.status();
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = ?err, "auth infrastructure failure");
        error(status, "Server Error")
    } else {
        error(status, "Unauthorized")
    }
}

pub fn db_error(err: sqlx::Error) -> ApiError {
    tracing::error!(error = %err, "database query failed");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
}
