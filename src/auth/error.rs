use axum::http::StatusCode;

/// Everything that can go wrong between an `Authorization` header arriving
/// and a subject id coming out the other side.
///
/// The credential-shaped variants never leave the session layer: they are
/// collapsed into `AuthenticationFailed` before a handler sees them, so the
/// response does not reveal which check rejected the request. Infrastructure
/// variants (`Entropy`, `Hashing`, `Storage`) propagate unchanged.
#[derive(Debug)]
pub enum AuthError {
    // Authorization header shape
    MissingCredential,
    MalformedCredential,

    // Access token (JWT)
    MalformedToken,
    InvalidSignature,
    ExpiredToken,
    InvalidSubject,

    // Refresh token
    UnknownToken,
    RevokedToken,

    // Collapsed, caller-facing
    AuthenticationFailed,

    // Infrastructure
    Entropy,
    Hashing,
    Storage(sqlx::Error),
}

impl AuthError {
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            AuthError::Entropy | AuthError::Hashing | AuthError::Storage(_)
        )
    }

    pub fn status(&self) -> StatusCode {
        if self.is_infrastructure() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::UNAUTHORIZED
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Storage(err)
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(_: bcrypt::BcryptError) -> Self {
        AuthError::Hashing
    }
}
