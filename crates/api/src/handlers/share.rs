//! Handlers for list-sharing (membership) changes.
//!
//! Both orientations of the same relation are exposed:
//! `/lists/{list_id}/users/{user_id}` and `/users/{user_id}/lists/{list_id}`.
//! All four routes require the `superuser` scope and delegate to the
//! membership service, which performs the scope synchronization.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shoplist_core::types::DbId;
use shoplist_db::models::membership::Membership;

use crate::error::AppResult;
use crate::middleware::acl::RequireSuperuser;
use crate::service::membership;
use crate::state::AppState;

/// Optional request body for share operations.
#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    /// Tier of the grant. Defaults to admin when the body is omitted.
    pub admin: Option<bool>,
}

/// POST /api/v1/lists/{list_id}/users/{user_id}
///
/// Share a list with a user. Body `{"admin": false}` grants the regular
/// tier; omitting the body (or the field) grants admin.
pub async fn lists_include(
    State(state): State<AppState>,
    RequireSuperuser(_caller): RequireSuperuser,
    Path((list_id, user_id)): Path<(DbId, DbId)>,
    body: Option<Json<ShareRequest>>,
) -> AppResult<(StatusCode, Json<Membership>)> {
    let admin = body.and_then(|Json(b)| b.admin).unwrap_or(true);
    let created = membership::include(&state.pool, user_id, list_id, admin).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/v1/lists/{list_id}/users/{user_id}
///
/// Revoke a user's access to a list. Returns 204 No Content.
pub async fn lists_exclude(
    State(state): State<AppState>,
    RequireSuperuser(_caller): RequireSuperuser,
    Path((list_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    membership::exclude(&state.pool, user_id, list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/{user_id}/lists/{list_id}
///
/// Same operation as [`lists_include`], path segments swapped.
pub async fn users_include(
    State(state): State<AppState>,
    RequireSuperuser(_caller): RequireSuperuser,
    Path((user_id, list_id)): Path<(DbId, DbId)>,
    body: Option<Json<ShareRequest>>,
) -> AppResult<(StatusCode, Json<Membership>)> {
    let admin = body.and_then(|Json(b)| b.admin).unwrap_or(true);
    let created = membership::include(&state.pool, user_id, list_id, admin).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/v1/users/{user_id}/lists/{list_id}
///
/// Same operation as [`lists_exclude`], path segments swapped.
pub async fn users_exclude(
    State(state): State<AppState>,
    RequireSuperuser(_caller): RequireSuperuser,
    Path((user_id, list_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    membership::exclude(&state.pool, user_id, list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
