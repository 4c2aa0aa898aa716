//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shoplist_core::error::CoreError;
use shoplist_db::models::user::{CreateUser, UserResponse};
use shoplist_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::acl::RequireSuperuser;
use crate::state::AppState;

/// Minimum accepted password length for new accounts.
const MIN_PASSWORD_LENGTH: usize = 12;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    /// Base (non-list) scope; defaults to empty. Per-list entries come from
    /// memberships and are never set here.
    pub scope: Option<String>,
}

/// POST /api/v1/users
///
/// Provision a new user (superuser only). The password is argon2id-hashed
/// before it touches the database.
pub async fn create_user(
    State(state): State<AppState>,
    RequireSuperuser(_caller): RequireSuperuser,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_new_user(&input.username, &input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        username: input.username,
        password_hash,
        scope: input.scope.unwrap_or_default(),
    };
    let user = UserRepo::create(&state.pool, &create).await?;
    tracing::info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Validate the fields of a new account before hashing anything.
fn validate_new_user(username: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username must not be empty".into());
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fields_pass() {
        assert!(validate_new_user("alice", "a-long-enough-password").is_ok());
    }

    #[test]
    fn test_blank_username_is_rejected() {
        let msg = validate_new_user("   ", "a-long-enough-password").unwrap_err();
        assert!(msg.contains("Username"));
    }

    #[test]
    fn test_short_password_is_rejected() {
        let msg = validate_new_user("alice", "short").unwrap_err();
        assert!(
            msg.contains("at least 12 characters"),
            "error message should state the minimum length"
        );
    }

    #[test]
    fn test_password_at_minimum_boundary_passes() {
        assert!(validate_new_user("alice", "twelve_chars").is_ok());
    }
}
