//! Refresh-token model and DTOs.

use shoplist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A refresh token row from the `refresh_tokens` table.
///
/// Carries the paired access-token string so a refresh grant can retire the
/// whole pair at once (token rotation).
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: DbId,
    pub token: String,
    pub access_token: String,
    pub expires: Timestamp,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for persisting a freshly issued refresh token.
pub struct CreateRefreshToken {
    pub token: String,
    pub access_token: String,
    pub expires: Timestamp,
    pub user_id: DbId,
}
