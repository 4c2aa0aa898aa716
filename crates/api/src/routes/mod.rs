//! Route definitions.

pub mod auth;
pub mod health;
pub mod lists;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/token                          password grant (public)
/// /auth/refresh                        refresh grant (public)
/// /auth/logout                         logout (requires auth)
///
/// /lists/{list_id}                     get list (requires list access)
/// /lists/{list_id}/users/{user_id}     share / unshare (superuser only)
///
/// /users                               create user (superuser only)
/// /users/{user_id}/lists/{list_id}     share / unshare (superuser only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/lists", lists::router())
        .nest("/users", users::router())
}
