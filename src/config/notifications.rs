//! Notification channel configuration.

use super::{env_flag, env_parse, env_string};
use std::{fmt, time::Duration};

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Credentials and defaults for the notification dispatcher
///
/// Absent credentials are not an error: the affected channel reports
/// "not configured" per request instead.
#[derive(Clone)]
pub struct NotificationConfig {
    pub telegram_bot_token: Option<String>,
    pub telegram_api_base: String,
    /// Used when a Discord request does not name its own webhook
    pub default_discord_webhook: Option<String>,
    /// Validate and log notifications without calling any provider
    pub demo_mode: bool,
    pub request_timeout_seconds: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            telegram_bot_token: None,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            default_discord_webhook: None,
            demo_mode: false,
            request_timeout_seconds: 10,
        }
    }
}

impl NotificationConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            telegram_bot_token: env_string("TELEGRAM_BOT_TOKEN"),
            telegram_api_base: env_string("TELEGRAM_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.to_string()),
            default_discord_webhook: env_string("DISCORD_WEBHOOK_URL"),
            demo_mode: env_flag("NOTIFICATIONS_DEMO_MODE", false),
            request_timeout_seconds: env_parse("NOTIFICATION_TIMEOUT_SECS", 10).max(1),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn telegram_configured(&self) -> bool {
        self.telegram_bot_token.is_some()
    }
}

// Keep the bot token out of debug output.
impl fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationConfig")
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("telegram_api_base", &self.telegram_api_base)
            .field("default_discord_webhook", &self.default_discord_webhook.is_some())
            .field("demo_mode", &self.demo_mode)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}
