//! Configuration structures and loading utilities.
//!
//! Every component receives an explicit configuration struct at construction.
//! Environment variables are only read here, once, at start-up.

pub mod metrics;
pub mod notifications;
pub mod rate_limit;
pub mod server;
pub mod totp;

pub use metrics::*;
pub use notifications::*;
pub use rate_limit::*;
pub use server::*;
pub use totp::*;

use std::{env, str::FromStr};

/// Read an environment variable, treating blank values as unset
pub(crate) fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an environment variable, falling back to `default` when unset or invalid
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env_string(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parse a boolean flag (`true`/`1`/`yes`, case-insensitive)
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    env_string(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}
