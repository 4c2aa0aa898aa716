//! Authentication and authorization extractors.

pub mod acl;
pub mod auth;
