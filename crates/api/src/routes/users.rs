//! Route definitions for the `/users` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::{share, user};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                             -> create user (superuser only)
/// POST   /{user_id}/lists/{list_id}    -> share list with user (superuser only)
/// DELETE /{user_id}/lists/{list_id}    -> unshare (superuser only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::create_user))
        .route(
            "/{user_id}/lists/{list_id}",
            post(share::users_include).delete(share::users_exclude),
        )
}
