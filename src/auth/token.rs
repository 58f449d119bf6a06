//! Token models: kinds, typed claims, redacted secrets, and issuance payloads.

pub mod claims;
pub mod grant;
pub mod kind;
pub mod secret;
