//! Domain services composing repositories with core logic.

pub mod membership;
