//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shoplist_core::error::CoreError;
use shoplist_core::scope::Scope;
use shoplist_core::types::DbId;
use shoplist_db::repositories::AccessTokenRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated principal resolved from a bearer token in the
/// `Authorization` header.
///
/// Resolution is a database lookup against the live (unexpired) tokens;
/// the stored scope string is parsed exactly once here, at the store
/// boundary. A scope update racing an in-flight request may still be
/// evaluated against the previous scope value; the new grant or
/// revocation is honored on the next request.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::debug!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The token owner's internal database id.
    pub user_id: DbId,
    /// The token's parsed scope.
    pub scope: Scope,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let bearer = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let row = AccessTokenRepo::find_live_by_token(&state.pool, bearer)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            })?;

        Ok(AuthUser {
            user_id: row.user_id,
            scope: Scope::parse(&row.scope),
        })
    }
}
