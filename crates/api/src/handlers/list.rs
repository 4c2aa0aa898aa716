//! Handlers for the `/lists` resource.

use axum::extract::{Path, State};
use axum::Json;
use shoplist_core::error::CoreError;
use shoplist_core::types::DbId;
use shoplist_db::models::list::List;
use shoplist_db::repositories::ListRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::acl::require_list_regular;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/lists/{list_id}
///
/// Fetch a list. Requires regular access to the list, which admin or
/// superuser grants also satisfy.
pub async fn get_list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(list_id): Path<DbId>,
) -> AppResult<Json<List>> {
    require_list_regular(&user, list_id)?;

    let list = ListRepo::find_by_id(&state.pool, list_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "List",
            id: list_id,
        }))?;

    Ok(Json(list))
}
