use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// One row of the `refresh_tokens` table. The token string itself is the
/// primary key; a row is active iff `revoked_at` is null and `expires_at`
/// is in the future. Rows are never deleted in normal operation.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    pub async fn insert(
        pool: &SqlitePool,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, created_at, expires_at, revoked_at)
            VALUES (?, ?, ?, ?, NULL)
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(Utc::now())
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn find(pool: &SqlitePool, token: &str) -> Result<Option<RefreshToken>, sqlx::Error> {
        sqlx::query_as::<_, RefreshToken>(
            r#"
            SELECT token, user_id, created_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await
    }

    /// Stamp `revoked_at` on the matching row, returning the number of rows
    /// that matched.
    pub async fn revoke(
        pool: &SqlitePool,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = ?
            WHERE token = ?
            "#,
        )
        .bind(revoked_at)
        .bind(token)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
