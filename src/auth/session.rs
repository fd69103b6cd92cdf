use axum::http::HeaderMap;
use chrono::Duration;
use sqlx::SqlitePool;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::auth::jwt::TokenCodec;
use crate::auth::refresh::RefreshTokenService;
use crate::auth::{AuthError, Credential, header, password};
use crate::models::user::User;

/// Result of a successful login: the subject's profile plus both tokens.
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Composes the hasher, extractor, token codec and refresh token manager
/// into the operations the handlers consume.
///
/// Every credential-specific failure is collapsed to
/// [`AuthError::AuthenticationFailed`] at this boundary, so callers cannot
/// distinguish an unknown email from a wrong password or a revoked token
/// from an expired one. The internal kind is logged before it is discarded.
/// Infrastructure failures pass through unchanged.
#[derive(Clone)]
pub struct SessionService {
    pool: SqlitePool,
    codec: TokenCodec,
    refresh_tokens: RefreshTokenService,
    polka_key: String,
}

impl SessionService {
    pub fn new(pool: SqlitePool, signing_key: &str, polka_key: &str) -> Self {
        Self {
            codec: TokenCodec::new(signing_key),
            refresh_tokens: RefreshTokenService::new(pool.clone()),
            polka_key: polka_key.to_string(),
            pool,
        }
    }

    /// Verify email + password and mint a fresh token pair. `access_ttl`
    /// overrides the one-hour default when given.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        access_ttl: Option<Duration>,
    ) -> Result<Session, AuthError> {
        self.login_inner(email, password, access_ttl)
            .await
            .map_err(collapse)
    }

    async fn login_inner(
        &self,
        email: &str,
        password_input: &str,
        access_ttl: Option<Duration>,
    ) -> Result<Session, AuthError> {
        let user = User::find_by_email(&self.pool, email)
            .await?
            .ok_or(AuthError::AuthenticationFailed)?;

        if !password::verify_password(password_input, &user.password_hash)? {
            return Err(AuthError::AuthenticationFailed);
        }

        let ttl = access_ttl.unwrap_or_else(|| Duration::hours(1));
        let access_token = self.codec.issue(user.id, ttl)?;
        let refresh_token = self.refresh_tokens.issue_default(user.id).await?;

        Ok(Session {
            user,
            access_token,
            refresh_token,
        })
    }

    /// Exchange a live refresh token (Bearer) for a new one-hour access
    /// token. The refresh token itself is not rotated.
    #[instrument(skip_all)]
    pub async fn refresh(&self, headers: &HeaderMap) -> Result<String, AuthError> {
        self.refresh_inner(headers).await.map_err(collapse)
    }

    async fn refresh_inner(&self, headers: &HeaderMap) -> Result<String, AuthError> {
        let token = bearer(headers)?;
        let subject = self.refresh_tokens.resolve(&token).await?;
        self.codec.issue(subject, Duration::hours(1))
    }

    /// Revoke the refresh token presented as a Bearer credential. Revoking
    /// an already-revoked token succeeds again.
    #[instrument(skip_all)]
    pub async fn revoke(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let token = bearer(headers).map_err(collapse)?;
        self.refresh_tokens.revoke(&token).await.map_err(collapse)
    }

    /// Validate a Bearer access token and return its subject. Ownership
    /// checks against that subject are the caller's job.
    #[instrument(skip_all)]
    pub async fn authorize_bearer(&self, headers: &HeaderMap) -> Result<Uuid, AuthError> {
        let result = bearer(headers).and_then(|token| self.codec.validate(&token));
        result.map_err(collapse)
    }

    /// Check the webhook caller's ApiKey credential against the configured
    /// Polka key. This path never touches tokens or storage.
    #[instrument(skip_all)]
    pub fn authorize_api_key(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let result = match header::from_headers(headers) {
            Ok(Credential::ApiKey(key)) if key == self.polka_key => Ok(()),
            Ok(_) => Err(AuthError::AuthenticationFailed),
            Err(err) => Err(err),
        };
        result.map_err(collapse)
    }
}

fn bearer(headers: &HeaderMap) -> Result<String, AuthError> {
    match header::from_headers(headers)? {
        Credential::Bearer(token) => Ok(token),
        Credential::ApiKey(_) => Err(AuthError::MalformedCredential),
    }
}

/// Collapse credential-specific failures into the generic caller-facing
/// kind; let infrastructure failures through untouched.
fn collapse(err: AuthError) -> AuthError {
    if err.is_infrastructure() {
        return err;
    }
    if !matches!(err, AuthError::AuthenticationFailed) {
        warn!(kind = ?err, "authentication rejected");
    }
    AuthError::AuthenticationFailed
}
