//! Postgres-backed [`TokenStore`] adapter.

use async_trait::async_trait;
use shoplist_core::error::CoreError;
use shoplist_core::sync::{LiveToken, TokenStore};
use shoplist_core::types::DbId;
use sqlx::PgPool;

use crate::repositories::AccessTokenRepo;

/// [`TokenStore`] implementation over the `access_tokens` table.
///
/// Each `update_scope` call is its own single-row UPDATE statement; the
/// adapter deliberately wraps nothing in a transaction, matching the
/// synchronizer's documented last-write-wins semantics.
#[derive(Clone)]
pub struct PgTokenStore {
    pool: PgPool,
}

impl PgTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenStore for PgTokenStore {
    async fn find_live(&self, user_id: DbId) -> Result<Vec<LiveToken>, CoreError> {
        let rows = AccessTokenRepo::find_live_by_user(&self.pool, user_id)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?;
        Ok(rows
            .into_iter()
            .map(|row| LiveToken {
                id: row.id,
                scope: row.scope,
            })
            .collect())
    }

    async fn update_scope(&self, token_id: DbId, scope: &str) -> Result<(), CoreError> {
        let updated = AccessTokenRepo::update_scope(&self.pool, token_id, scope)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?;
        tracing::debug!(token_id, updated, scope, "Rewrote access token scope");
        Ok(())
    }
}
