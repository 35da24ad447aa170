//! HTTP server configuration.

use super::{env_parse, env_string};
use std::time::Duration;

/// Bind address and background task settings for the HTTP server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How often expired rate-limit windows are swept
    pub cleanup_interval_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cleanup_interval_seconds: 300, // 5 minutes
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env_string("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT", defaults.port),
            cleanup_interval_seconds: env_parse(
                "RATE_LIMIT_CLEANUP_INTERVAL_SECS",
                defaults.cleanup_interval_seconds,
            )
            .max(1),
        }
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
