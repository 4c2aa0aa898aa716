//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod access_token_repo;
pub mod list_repo;
pub mod membership_repo;
pub mod refresh_token_repo;
pub mod user_repo;

pub use access_token_repo::AccessTokenRepo;
pub use list_repo::ListRepo;
pub use membership_repo::MembershipRepo;
pub use refresh_token_repo::RefreshTokenRepo;
pub use user_repo::UserRepo;
