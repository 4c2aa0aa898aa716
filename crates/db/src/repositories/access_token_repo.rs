//! Repository for the `access_tokens` table.

use shoplist_core::types::DbId;
use sqlx::PgPool;

use crate::models::access_token::{AccessToken, CreateAccessToken};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, token, scope, expires, user_id, created_at, updated_at";

/// Provides CRUD operations for access tokens.
pub struct AccessTokenRepo;

impl AccessTokenRepo {
    /// Insert a new access token, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAccessToken,
    ) -> Result<AccessToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO access_tokens (token, scope, expires, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessToken>(&query)
            .bind(&input.token)
            .bind(&input.scope)
            .bind(input.expires)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find an unexpired token by its opaque bearer string.
    pub async fn find_live_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<AccessToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM access_tokens
             WHERE token = $1 AND expires >= NOW()"
        );
        sqlx::query_as::<_, AccessToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Find all unexpired tokens belonging to a user.
    pub async fn find_live_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AccessToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM access_tokens
             WHERE user_id = $1 AND expires >= NOW()
             ORDER BY id"
        );
        sqlx::query_as::<_, AccessToken>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the scope string of a single token.
    ///
    /// A plain single-row UPDATE with no surrounding transaction; concurrent
    /// writers are last-write-wins on this column. Returns `true` if the row
    /// was updated.
    pub async fn update_scope(
        pool: &PgPool,
        id: DbId,
        scope: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE access_tokens SET scope = $2 WHERE id = $1")
            .bind(id)
            .bind(scope)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a token by its bearer string. Returns `true` if a row was deleted.
    pub async fn delete_by_token(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM access_tokens WHERE token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all tokens for a user (logout). Returns the count of deleted rows.
    pub async fn delete_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM access_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete expired tokens. Returns the count of deleted rows.
    pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM access_tokens WHERE expires < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
