//! Redaction of credentials from text that may reach logs or API responses.

use regex::Regex;
use std::sync::LazyLock;

/// Credential patterns and their replacements
static SECRET_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Telegram bot token inside a Bot API URL
        (r"bot\d+:[A-Za-z0-9_-]+", "bot[REDACTED]"),
        // Discord webhook token
        (r"(/api/webhooks/\d+/)[A-Za-z0-9_.-]+", "${1}[REDACTED]"),
        (r#"(?i)("token":\s*)"[^"]+""#, r#"${1}"[REDACTED]""#),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Replace bot tokens and webhook secrets in `input`
pub fn redact_secrets(input: &str) -> String {
    SECRET_PATTERNS
        .iter()
        .fold(input.to_string(), |text, (re, replacement)| {
            re.replace_all(&text, *replacement).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_telegram_token_in_url() {
        let input = "error sending request for url (https://api.telegram.org/bot123456:AAH-x_yZ/sendMessage)";
        let redacted = redact_secrets(input);

        assert!(!redacted.contains("AAH-x_yZ"));
        assert!(redacted.contains("https://api.telegram.org/bot[REDACTED]/sendMessage"));
    }

    #[test]
    fn test_redacts_discord_webhook_token() {
        let redacted = redact_secrets("https://discord.com/api/webhooks/42/s3cr3t-T0ken");
        assert_eq!(redacted, "https://discord.com/api/webhooks/42/[REDACTED]");
    }

    #[test]
    fn test_redacts_json_token_field() {
        let redacted = redact_secrets(r#"{"token": "abc123", "ok": false}"#);
        assert_eq!(redacted, r#"{"token": "[REDACTED]", "ok": false}"#);
    }

    #[test]
    fn test_leaves_plain_text_alone() {
        assert_eq!(redact_secrets("Unknown Webhook"), "Unknown Webhook");
    }
}
