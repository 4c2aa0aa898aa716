//! User-to-list membership model.

use serde::Serialize;
use shoplist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `memberships` join table.
///
/// Composite identity is `(user_id, list_id)`; exactly one row exists per
/// pair. The `admin` flag selects which permission tier a live access token
/// carries for the list (`admin:<id>` vs `regular:<id>`).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Membership {
    pub user_id: DbId,
    pub list_id: DbId,
    pub admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
