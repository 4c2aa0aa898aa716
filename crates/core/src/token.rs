//! Opaque bearer-token generation.
//!
//! Access and refresh tokens are random alphanumeric strings with no
//! embedded structure. They have to stay opaque: the whole point of scope
//! reconciliation is that a token's grants can change after issuance, which
//! rules out self-contained signed tokens.

use rand::Rng;

/// Length of generated token strings (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 48;

/// Generate a new random bearer token.
///
/// Uniqueness is enforced by the unique index on the token column, not
/// here; at 48 alphanumeric characters a collision is not a practical
/// concern.
pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_distinct() {
        assert_ne!(generate_token(), generate_token());
    }
}
