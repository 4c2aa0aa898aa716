//! Password verification and bearer-token issuance.

pub mod password;
pub mod token;
