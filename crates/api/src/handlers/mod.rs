//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod list;
pub mod share;
pub mod user;
