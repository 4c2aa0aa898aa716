//! Domain logic for the shoplist backend.
//!
//! This crate has no internal dependencies so the scope model and the
//! token reconciliation logic can be used (and tested) without the
//! persistence or HTTP layers.

pub mod error;
pub mod scope;
pub mod sync;
pub mod token;
pub mod types;
