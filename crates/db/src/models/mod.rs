//! Row structs and DTOs, one module per table.

pub mod access_token;
pub mod list;
pub mod membership;
pub mod refresh_token;
pub mod user;
