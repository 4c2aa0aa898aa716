//! Periodic deletion of expired access and refresh tokens.
//!
//! Expired tokens are invisible to authentication and to the scope
//! synchronizer (both query with `expires >= now`), so this sweep is purely
//! about not accumulating dead rows. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use shoplist_db::repositories::{AccessTokenRepo, RefreshTokenRepo};

/// How often the purge job runs.
const PURGE_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the expired-token purge loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = PURGE_INTERVAL.as_secs(),
        "Token purge job started"
    );

    let mut interval = tokio::time::interval(PURGE_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Token purge job stopping");
                break;
            }
            _ = interval.tick() => {
                purge_once(&pool).await;
            }
        }
    }
}

/// One purge pass over both token tables.
async fn purge_once(pool: &PgPool) {
    match AccessTokenRepo::purge_expired(pool).await {
        Ok(deleted) if deleted > 0 => {
            tracing::info!(deleted, "Token purge: removed expired access tokens");
        }
        Ok(_) => tracing::debug!("Token purge: no expired access tokens"),
        Err(e) => tracing::error!(error = %e, "Token purge: access token sweep failed"),
    }

    match RefreshTokenRepo::purge_expired(pool).await {
        Ok(deleted) if deleted > 0 => {
            tracing::info!(deleted, "Token purge: removed expired refresh tokens");
        }
        Ok(_) => tracing::debug!("Token purge: no expired refresh tokens"),
        Err(e) => tracing::error!(error = %e, "Token purge: refresh token sweep failed"),
    }
}
