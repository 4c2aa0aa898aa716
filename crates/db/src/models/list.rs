//! Shopping-list entity model.

use serde::Serialize;
use shoplist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A shopping list row from the `lists` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct List {
    pub id: DbId,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
