//! Scope-based authorization checks.
//!
//! [`RequireSuperuser`] wraps [`AuthUser`] and rejects requests whose scope
//! does not carry the `superuser` grant. Per-list checks need the list id
//! from the request path, so they are plain functions called inside handlers
//! rather than extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shoplist_core::error::CoreError;
use shoplist_core::scope::Permission;
use shoplist_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `superuser` scope. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn superuser_only(RequireSuperuser(user): RequireSuperuser) -> AppResult<Json<()>> {
///     // user's token is guaranteed to carry superuser here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireSuperuser(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperuser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.scope.satisfies(&Permission::Superuser) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Superuser scope required".into(),
            )));
        }
        Ok(RequireSuperuser(user))
    }
}

/// Requires `admin:<list_id>` (or `superuser`). Rejects with 403 otherwise.
pub fn require_list_admin(user: &AuthUser, list_id: DbId) -> Result<(), AppError> {
    if user.scope.satisfies(&Permission::ListAdmin(list_id)) {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(format!(
        "Admin access to list {list_id} required"
    ))))
}

/// Requires `regular:<list_id>`, which an `admin:<list_id>` or `superuser`
/// grant also satisfies. Rejects with 403 otherwise.
pub fn require_list_regular(user: &AuthUser, list_id: DbId) -> Result<(), AppError> {
    if user.scope.satisfies(&Permission::ListRegular(list_id)) {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(format!(
        "Access to list {list_id} required"
    ))))
}

#[cfg(test)]
mod tests {
    use shoplist_core::scope::Scope;

    use super::*;

    fn user_with_scope(raw: &str) -> AuthUser {
        AuthUser {
            user_id: 1,
            scope: Scope::parse(raw),
        }
    }

    #[test]
    fn test_admin_grant_satisfies_both_checks() {
        let user = user_with_scope("admin:5");
        assert!(require_list_admin(&user, 5).is_ok());
        assert!(require_list_regular(&user, 5).is_ok());
    }

    #[test]
    fn test_regular_grant_does_not_satisfy_admin() {
        let user = user_with_scope("regular:5");
        assert!(require_list_regular(&user, 5).is_ok());
        assert!(require_list_admin(&user, 5).is_err());
    }

    #[test]
    fn test_superuser_satisfies_any_list() {
        let user = user_with_scope("superuser");
        assert!(require_list_admin(&user, 99).is_ok());
        assert!(require_list_regular(&user, 99).is_ok());
    }

    #[test]
    fn test_unrelated_list_is_forbidden() {
        let user = user_with_scope("admin:5");
        assert!(require_list_regular(&user, 6).is_err());
    }
}
