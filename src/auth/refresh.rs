use chrono::{Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

use crate::auth::AuthError;
use crate::models::refresh_token::RefreshToken;

/// Default refresh token lifetime.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Generate an opaque refresh token: 32 bytes from the OS entropy source,
/// hex-encoded to 64 characters.
pub fn generate() -> Result<String, AuthError> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| AuthError::Entropy)?;
    Ok(hex::encode(bytes))
}

/// Issues, resolves and revokes refresh tokens. Token rows live in the
/// `refresh_tokens` table; expiry is evaluated lazily at resolve time, and
/// expired rows are never swept.
#[derive(Clone)]
pub struct RefreshTokenService {
    pool: SqlitePool,
}

impl RefreshTokenService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Generate a token and persist it for `user_id`. The token string is
    /// only returned once the row is stored, so no unpersisted token ever
    /// reaches a client.
    #[instrument(skip(self))]
    pub async fn issue_and_store(&self, user_id: Uuid, ttl: Duration) -> Result<String, AuthError> {
        let token = generate()?;
        RefreshToken::insert(&self.pool, &token, user_id, Utc::now() + ttl).await?;
        Ok(token)
    }

    pub async fn issue_default(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.issue_and_store(user_id, Duration::days(REFRESH_TOKEN_TTL_DAYS))
            .await
    }

    /// Look up a token and return its owning subject, but only while the
    /// token is active: not revoked and not past its expiry.
    #[instrument(skip_all)]
    pub async fn resolve(&self, token: &str) -> Result<Uuid, AuthError> {
        let row = RefreshToken::find(&self.pool, token)
            .await?
            .ok_or(AuthError::UnknownToken)?;

        if row.is_revoked() {
            return Err(AuthError::RevokedToken);
        }
        if row.is_expired() {
            return Err(AuthError::ExpiredToken);
        }
        Ok(row.user_id)
    }

    /// Set `revoked_at` on the matching row. Revoking an already-revoked
    /// token succeeds again (last write wins on the timestamp); an unknown
    /// token is an error.
    #[instrument(skip_all)]
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let affected = RefreshToken::revoke(&self.pool, token, Utc::now()).await?;
        if affected == 0 {
            return Err(AuthError::UnknownToken);
        }
        Ok(())
    }
}
