//! Repository for the `memberships` join table.

use shoplist_core::types::DbId;
use sqlx::PgPool;

use crate::models::membership::Membership;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, list_id, admin, created_at, updated_at";

/// Provides operations on user-to-list memberships.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Attach a user to a list, or update the tier of an existing attachment.
    ///
    /// The `(user_id, list_id)` pair is unique, so repeating an attachment
    /// with a different `admin` flag flips the tier in place.
    pub async fn attach(
        pool: &PgPool,
        user_id: DbId,
        list_id: DbId,
        admin: bool,
    ) -> Result<Membership, sqlx::Error> {
        let query = format!(
            "INSERT INTO memberships (user_id, list_id, admin)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, list_id) DO UPDATE SET admin = EXCLUDED.admin
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(user_id)
            .bind(list_id)
            .bind(admin)
            .fetch_one(pool)
            .await
    }

    /// Detach a user from a list. Returns `true` if a row was deleted.
    pub async fn detach(
        pool: &PgPool,
        user_id: DbId,
        list_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM memberships WHERE user_id = $1 AND list_id = $2")
            .bind(user_id)
            .bind(list_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All memberships of a user, ordered by list id.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships WHERE user_id = $1 ORDER BY list_id"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
