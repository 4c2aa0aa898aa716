//! Repository for the `lists` table.

use shoplist_core::types::DbId;
use sqlx::PgPool;

use crate::models::list::List;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, is_active, created_at, updated_at";

/// Provides lookup operations for shopping lists.
pub struct ListRepo;

impl ListRepo {
    /// Find a list by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<List>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lists WHERE id = $1");
        sqlx::query_as::<_, List>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
