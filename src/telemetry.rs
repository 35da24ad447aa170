//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Output format for log lines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`; anything other than `json` means text
    pub fn from_env() -> Self {
        match crate::config::env_string("LOG_FORMAT") {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Install the global subscriber, filtered by `RUST_LOG` (default `info`)
///
/// Returns an error if a global subscriber is already set.
pub fn init_tracing(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_target(true);

    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::ENV_MUTEX;
    use std::env;

    #[test]
    fn test_log_format_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();

        unsafe {
            env::set_var("LOG_FORMAT", "JSON");
        }
        assert_eq!(LogFormat::from_env(), LogFormat::Json);

        unsafe {
            env::set_var("LOG_FORMAT", "pretty");
        }
        assert_eq!(LogFormat::from_env(), LogFormat::Text);

        unsafe {
            env::remove_var("LOG_FORMAT");
        }
        assert_eq!(LogFormat::from_env(), LogFormat::Text);
    }
}
