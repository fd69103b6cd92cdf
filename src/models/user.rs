use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_chirpy_red: bool,
}

impl User {
    pub async fn create(
        pool: &SqlitePool,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let user = User {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            is_chirpy_red: false,
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, created_at, updated_at, email, password_hash, is_chirpy_red)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id)
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_chirpy_red)
        .execute(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(
        pool: &SqlitePool,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, password_hash, is_chirpy_red
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, password_hash, is_chirpy_red
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn update_credentials(
        pool: &SqlitePool,
        id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = ?, password_hash = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    /// Flip the premium flag. Returns the number of matched rows so the
    /// webhook handler can 404 on unknown users.
    pub async fn upgrade_to_chirpy_red(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_chirpy_red = 1, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Dev-only: wipe all users. Chirps and refresh tokens go with them via
    /// cascading deletes.
    pub async fn reset(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM users").execute(pool).await?;
        Ok(())
    }
}
