//! Handlers for the `/auth` resource (password grant, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use shoplist_core::error::CoreError;
use shoplist_db::models::access_token::CreateAccessToken;
use shoplist_db::models::refresh_token::CreateRefreshToken;
use shoplist_db::models::user::User;
use shoplist_db::repositories::{AccessTokenRepo, RefreshTokenRepo, UserRepo};

use crate::auth::token::issue_pair;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::service::membership;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/token`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by token and refresh grants.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    /// The space-delimited scope the access token was issued with.
    pub scope: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/token
///
/// Password grant: authenticate with username + password, returning an
/// access + refresh token pair. The issued scope is the user's base scope
/// plus one per-list entry per current membership.
pub async fn token(
    State(state): State<AppState>,
    Json(input): Json<TokenRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find user by username.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    // 2. Check if the account is active.
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 3. Verify password.
    let password_valid = crate::auth::password::verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    // 4. Issue and persist a token pair.
    let response = create_auth_response(&state, &user).await?;
    tracing::info!(user_id = user.id, "Issued token pair (password grant)");

    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new access + refresh pair. The old
/// pair is retired (token rotation) and the new scope reflects the user's
/// memberships as they are now, not as they were at first login.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find a matching live refresh token.
    let refresh_token = RefreshTokenRepo::find_live_by_token(&state.pool, &input.refresh_token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 2. Retire the old pair.
    RefreshTokenRepo::delete(&state.pool, refresh_token.id).await?;
    AccessTokenRepo::delete_by_token(&state.pool, &refresh_token.access_token).await?;

    // 3. The user must still exist and be active.
    let user = UserRepo::find_by_id(&state.pool, refresh_token.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 4. Issue and persist a new pair.
    let response = create_auth_response(&state, &user).await?;
    tracing::info!(user_id = user.id, "Issued token pair (refresh grant)");

    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Delete all tokens for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let access = AccessTokenRepo::delete_for_user(&state.pool, auth_user.user_id).await?;
    let refresh = RefreshTokenRepo::delete_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(
        user_id = auth_user.user_id,
        access,
        refresh,
        "Logged out, tokens deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Compose the scope, mint a token pair, persist both rows, and build the
/// response.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let scope = membership::compose_scope(&state.pool, user).await?;
    let scope_string = scope.to_string();

    let issued = issue_pair(&state.config.token);

    let access_input = CreateAccessToken {
        token: issued.access_token.clone(),
        scope: scope_string.clone(),
        expires: issued.access_expires,
        user_id: user.id,
    };
    AccessTokenRepo::create(&state.pool, &access_input).await?;

    let refresh_input = CreateRefreshToken {
        token: issued.refresh_token.clone(),
        access_token: issued.access_token.clone(),
        expires: issued.refresh_expires,
        user_id: user.id,
    };
    RefreshTokenRepo::create(&state.pool, &refresh_input).await?;

    Ok(AuthResponse {
        access_token: issued.access_token,
        token_type: "Bearer",
        refresh_token: issued.refresh_token,
        expires_in: issued.expires_in,
        scope: scope_string,
    })
}
