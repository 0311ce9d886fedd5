//! Credential domain: API modes, validated credentials, redacted secrets.

pub mod credential;
pub mod secret;

pub use credential::*;
pub use secret::*;
