//! Membership changes and the scope synchronization they trigger.
//!
//! Sharing or unsharing a list is a two-step operation: write the
//! membership row, then rewrite the scope of every live access token the
//! affected user holds so the change takes effect without re-issuing
//! tokens. A synchronization failure fails the whole request; succeeding
//! silently while a stale grant remains would let a revoked user keep
//! effective access until their token expired.

use shoplist_core::error::CoreError;
use shoplist_core::scope::{Permission, Scope};
use shoplist_core::sync::ScopeSynchronizer;
use shoplist_core::types::DbId;
use shoplist_db::models::membership::Membership;
use shoplist_db::models::user::User;
use shoplist_db::repositories::{ListRepo, MembershipRepo, UserRepo};
use shoplist_db::{DbPool, PgTokenStore};

use crate::error::{AppError, AppResult};

/// Attach `user_id` to `list_id` at the given tier and propagate the grant
/// to the user's live access tokens.
///
/// Re-attaching an existing pair updates the tier of the membership row, but
/// note that the token grant only accumulates: an earlier `admin:<id>` entry
/// is not removed when the pair is re-attached as regular. Callers that want
/// a clean tier switch exclude first.
pub async fn include(
    pool: &DbPool,
    user_id: DbId,
    list_id: DbId,
    admin: bool,
) -> AppResult<Membership> {
    ensure_user_exists(pool, user_id).await?;
    ensure_list_exists(pool, list_id).await?;

    let membership = MembershipRepo::attach(pool, user_id, list_id, admin).await?;
    tracing::info!(user_id, list_id, admin, "Membership attached");

    ScopeSynchronizer::new(PgTokenStore::new(pool.clone()))
        .include(user_id, list_id, admin)
        .await?;

    Ok(membership)
}

/// Detach `user_id` from `list_id` and strip both permission tiers for the
/// list from the user's live access tokens.
pub async fn exclude(pool: &DbPool, user_id: DbId, list_id: DbId) -> AppResult<()> {
    ensure_user_exists(pool, user_id).await?;
    ensure_list_exists(pool, list_id).await?;

    let detached = MembershipRepo::detach(pool, user_id, list_id).await?;
    tracing::info!(user_id, list_id, detached, "Membership detached");

    ScopeSynchronizer::new(PgTokenStore::new(pool.clone()))
        .exclude(user_id, list_id)
        .await?;

    Ok(())
}

/// The scope a freshly issued token carries: the user's base (non-list)
/// scope plus one per-list entry per current membership.
pub async fn compose_scope(pool: &DbPool, user: &User) -> AppResult<Scope> {
    let mut scope = Scope::parse(&user.scope);
    for membership in MembershipRepo::find_by_user(pool, user.id).await? {
        scope.grant(Permission::for_list(membership.list_id, membership.admin));
    }
    Ok(scope)
}

async fn ensure_user_exists(pool: &DbPool, user_id: DbId) -> AppResult<()> {
    UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(())
}

async fn ensure_list_exists(pool: &DbPool, list_id: DbId) -> AppResult<()> {
    ListRepo::find_by_id(pool, list_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "List",
            id: list_id,
        }))?;
    Ok(())
}
