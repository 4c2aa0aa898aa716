//! Route definitions for the `/lists` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{list, share};
use crate::state::AppState;

/// Routes mounted at `/lists`.
///
/// ```text
/// GET    /{list_id}                    -> get list (requires list access)
/// POST   /{list_id}/users/{user_id}    -> share with user (superuser only)
/// DELETE /{list_id}/users/{user_id}    -> unshare (superuser only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{list_id}", get(list::get_list))
        .route(
            "/{list_id}/users/{user_id}",
            post(share::lists_include).delete(share::lists_exclude),
        )
}
