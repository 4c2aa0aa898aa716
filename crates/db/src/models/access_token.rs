//! Access-token model and DTOs.

use shoplist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// An access token row from the `access_tokens` table.
///
/// The `token` column is a globally unique opaque bearer string. The `scope`
/// column is rewritten in place by the scope synchronizer when the owner's
/// memberships change, so outstanding tokens never need re-issuing.
#[derive(Debug, Clone, FromRow)]
pub struct AccessToken {
    pub id: DbId,
    pub token: String,
    pub scope: String,
    pub expires: Timestamp,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for persisting a freshly issued access token.
pub struct CreateAccessToken {
    pub token: String,
    pub scope: String,
    pub expires: Timestamp,
    pub user_id: DbId,
}
