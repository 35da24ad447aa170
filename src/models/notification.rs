//! Notification request and result models.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency of a notification; drives color and emoji on every channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    #[default]
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
    #[serde(alias = "urgent")]
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional transaction context attached to a notification
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
pub struct NotificationData {
    /// On-chain transaction hash
    #[serde(default, alias = "txHash")]
    pub tx_hash: Option<String>,
    /// Link the recipient can follow for details
    #[serde(default, alias = "actionUrl")]
    pub action_url: Option<String>,
}

impl NotificationData {
    pub fn tx_hash(&self) -> Option<&str> {
        non_blank(self.tx_hash.as_deref())
    }

    pub fn action_url(&self) -> Option<&str> {
        non_blank(self.action_url.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Channel-independent content of a notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationPayload {
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub data: NotificationData,
}

/// Request body for Discord webhook dispatch
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct DiscordNotificationRequest {
    /// Falls back to the configured default webhook when omitted
    #[serde(default, alias = "webhookUrl")]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub data: Option<NotificationData>,
}

/// Request body for Telegram dispatch
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct TelegramNotificationRequest {
    #[serde(default, alias = "chatId")]
    pub chat_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub data: Option<NotificationData>,
}

/// Request body for email dispatch
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct EmailNotificationRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub data: Option<NotificationData>,
}

/// Outcome of a dispatch attempt as returned to API callers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
pub struct DispatchResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    pub fn delivered() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_accepts_both_cases() {
        let upper: Priority = serde_json::from_str("\"URGENT\"").unwrap();
        let lower: Priority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(upper, Priority::Urgent);
        assert_eq!(lower, Priority::Urgent);
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"HIGH\"");
    }

    #[test]
    fn test_missing_fields_deserialize_as_blank() {
        let request: DiscordNotificationRequest =
            serde_json::from_str(r#"{"title": "Payment received"}"#).unwrap();

        assert_eq!(request.title, "Payment received");
        assert!(request.message.is_empty());
        assert_eq!(request.priority, Priority::Low);
        assert!(request.webhook_url.is_none());
    }

    #[test]
    fn test_camel_case_aliases() {
        let request: TelegramNotificationRequest = serde_json::from_str(
            r#"{"chatId": "42", "title": "t", "message": "m",
                "data": {"txHash": "0xabc", "actionUrl": "https://example.com"}}"#,
        )
        .unwrap();

        let data = request.data.unwrap();
        assert_eq!(request.chat_id, "42");
        assert_eq!(data.tx_hash(), Some("0xabc"));
        assert_eq!(data.action_url(), Some("https://example.com"));
    }

    #[test]
    fn test_blank_data_fields_are_ignored() {
        let data = NotificationData {
            tx_hash: Some("   ".to_string()),
            action_url: None,
        };
        assert_eq!(data.tx_hash(), None);
        assert_eq!(data.action_url(), None);
    }

    #[test]
    fn test_dispatch_result_omits_empty_error() {
        let json = serde_json::to_value(DispatchResult::delivered()).unwrap();
        assert_eq!(json, serde_json::json!({"success": true}));

        let json = serde_json::to_value(DispatchResult::failed("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
    }
}
