//! Bearer-token issuance helpers.
//!
//! Access and refresh tokens are opaque random strings stored server-side
//! with their expiry and scope. Validation is a database lookup, not a
//! signature check, which is what allows scope to be rewritten on
//! outstanding tokens when list memberships change.

use chrono::Utc;
use shoplist_core::token::generate_token;
use shoplist_core::types::Timestamp;

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Configuration for bearer-token issuance.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

impl TokenConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default |
    /// |-----------------------------|----------|---------|
    /// | `ACCESS_TOKEN_EXPIRY_MINS`  | no       | `60`    |
    /// | `REFRESH_TOKEN_EXPIRY_DAYS` | no       | `7`     |
    pub fn from_env() -> Self {
        let access_token_expiry_mins: i64 = std::env::var("ACCESS_TOKEN_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("ACCESS_TOKEN_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("REFRESH_TOKEN_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("REFRESH_TOKEN_EXPIRY_DAYS must be a valid i64");

        Self {
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

/// A freshly minted access + refresh token pair, not yet persisted.
#[derive(Debug)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires: Timestamp,
    pub refresh_expires: Timestamp,
    /// Access token lifetime in seconds, for the response body.
    pub expires_in: i64,
}

/// Mint a new token pair with expiries derived from `config`.
pub fn issue_pair(config: &TokenConfig) -> IssuedTokens {
    let now = Utc::now();
    IssuedTokens {
        access_token: generate_token(),
        refresh_token: generate_token(),
        access_expires: now + chrono::Duration::minutes(config.access_token_expiry_mins),
        refresh_expires: now + chrono::Duration::days(config.refresh_token_expiry_days),
        expires_in: config.access_token_expiry_mins * 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TokenConfig {
        TokenConfig {
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn test_issued_pair_is_distinct_and_ordered() {
        let issued = issue_pair(&test_config());

        assert_ne!(issued.access_token, issued.refresh_token);
        assert!(
            issued.refresh_expires > issued.access_expires,
            "refresh token must outlive the access token"
        );
        assert_eq!(issued.expires_in, 3600);
    }

    #[test]
    fn test_expiries_are_in_the_future() {
        let issued = issue_pair(&test_config());
        let now = Utc::now();
        assert!(issued.access_expires > now);
        assert!(issued.refresh_expires > now);
    }
}
