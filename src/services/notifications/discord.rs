//! Discord webhook channel.

use super::{
    NotificationDispatcher, NotificationError, PriorityStyle, ensure_success, parse_http_url,
    require_fields,
};
use crate::models::{DiscordNotificationRequest, NotificationPayload};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

const CHANNEL: &str = "discord";
const FOOTER: &str = "TreasuryFlow";

impl NotificationDispatcher {
    /// Post an embed to a Discord webhook
    ///
    /// The request's `webhook_url` wins over the configured default. Blank
    /// required fields fail validation without any network I/O.
    pub async fn send_discord(
        &self,
        request: &DiscordNotificationRequest,
    ) -> Result<(), NotificationError> {
        let result = self.deliver_discord(request).await;
        self.record(CHANNEL, &result);
        result
    }

    async fn deliver_discord(
        &self,
        request: &DiscordNotificationRequest,
    ) -> Result<(), NotificationError> {
        let webhook_url = request
            .webhook_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .or(self.config.default_discord_webhook.as_deref())
            .unwrap_or_default();

        require_fields(&[
            ("webhook_url", webhook_url),
            ("title", &request.title),
            ("message", &request.message),
        ])?;
        let url = parse_http_url("webhook_url", webhook_url)?;

        let payload = NotificationPayload::new(
            &request.title,
            &request.message,
            request.priority,
            request.data.as_ref(),
        );
        let body = render_discord_payload(&payload, Utc::now());

        if self.config.demo_mode {
            tracing::info!(
                target: "notifications",
                channel = CHANNEL,
                title = %payload.title,
                priority = %payload.priority,
                "Demo mode: Discord notification not sent"
            );
            return Ok(());
        }

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotificationError::transport(CHANNEL, &e))?;

        ensure_success(CHANNEL, response).await.map(|_| ())
    }
}

/// Build the webhook body: one embed styled by priority
pub fn render_discord_payload(payload: &NotificationPayload, timestamp: DateTime<Utc>) -> Value {
    let style = PriorityStyle::for_priority(payload.priority);

    let mut fields = vec![json!({
        "name": "Priority",
        "value": payload.priority.as_str(),
        "inline": true,
    })];

    if let Some(tx_hash) = payload.data.tx_hash() {
        fields.push(json!({
            "name": "Transaction Hash",
            "value": format!("`{tx_hash}`"),
            "inline": false,
        }));
    }

    if let Some(action_url) = payload.data.action_url() {
        fields.push(json!({
            "name": "Action",
            "value": format!("[View Details]({action_url})"),
            "inline": false,
        }));
    }

    let mut embed = json!({
        "title": format!("{} {}", style.emoji, payload.title),
        "description": payload.message,
        "color": style.color,
        "fields": fields,
        "timestamp": timestamp.to_rfc3339(),
        "footer": { "text": FOOTER },
    });

    if let Some(action_url) = payload.data.action_url() {
        embed["url"] = json!(action_url);
    }

    json!({
        "username": FOOTER,
        "embeds": [embed],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::NotificationConfig,
        models::{NotificationData, Priority},
        services::notifications::{LOW_COLOR, URGENT_COLOR},
    };
    use chrono::TimeZone;

    fn payload(priority: Priority, data: NotificationData) -> NotificationPayload {
        NotificationPayload {
            title: "Large withdrawal".to_string(),
            message: "50,000 USDC left the treasury".to_string(),
            priority,
            data,
        }
    }

    #[test]
    fn test_urgent_embed_color_and_title() {
        let at = Utc.with_ymd_and_hms(2026, 2, 1, 8, 30, 0).unwrap();
        let body = render_discord_payload(&payload(Priority::Urgent, NotificationData::default()), at);
        let embed = &body["embeds"][0];

        assert_eq!(embed["color"], json!(URGENT_COLOR));
        assert!(embed["title"].as_str().unwrap().starts_with("🚨"));
        assert_eq!(embed["title"], "🚨 Large withdrawal");
        assert_eq!(embed["description"], "50,000 USDC left the treasury");
        assert_eq!(embed["timestamp"], at.to_rfc3339());
        assert!(embed.get("url").is_none());
        assert_eq!(embed["fields"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_embed_includes_transaction_and_link() {
        let data = NotificationData {
            tx_hash: Some("0xdeadbeef".to_string()),
            action_url: Some("https://app.treasuryflow.io/tx/0xdeadbeef".to_string()),
        };
        let body = render_discord_payload(&payload(Priority::Low, data), Utc::now());
        let embed = &body["embeds"][0];
        let fields = embed["fields"].as_array().unwrap();

        assert_eq!(embed["color"], json!(LOW_COLOR));
        assert_eq!(embed["url"], "https://app.treasuryflow.io/tx/0xdeadbeef");
        assert!(fields.iter().any(|f| f["value"] == "`0xdeadbeef`"));
        assert!(fields.iter().any(|f| {
            f["value"] == "[View Details](https://app.treasuryflow.io/tx/0xdeadbeef)"
        }));
    }

    #[tokio::test]
    async fn test_missing_message_fails_without_network() {
        // An unroutable webhook proves no request is attempted.
        let dispatcher = NotificationDispatcher::new(NotificationConfig::default()).unwrap();
        let request = DiscordNotificationRequest {
            webhook_url: Some("http://192.0.2.1:9/webhook".to_string()),
            title: "Payment sent".to_string(),
            ..Default::default()
        };

        let err = dispatcher.send_discord(&request).await.unwrap_err();
        assert!(matches!(err, NotificationError::Validation(_)));
        assert_eq!(err.to_string(), "Missing required fields: message");
    }

    #[tokio::test]
    async fn test_missing_webhook_without_default_is_invalid() {
        let dispatcher = NotificationDispatcher::new(NotificationConfig::default()).unwrap();
        let request = DiscordNotificationRequest {
            title: "t".to_string(),
            message: "m".to_string(),
            ..Default::default()
        };

        let err = dispatcher.send_discord(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: webhook_url");
    }

    #[tokio::test]
    async fn test_demo_mode_uses_default_webhook_and_skips_io() {
        let config = NotificationConfig {
            demo_mode: true,
            default_discord_webhook: Some("http://192.0.2.1:9/webhook".to_string()),
            ..Default::default()
        };
        let dispatcher = NotificationDispatcher::new(config).unwrap();
        let request = DiscordNotificationRequest {
            title: "t".to_string(),
            message: "m".to_string(),
            priority: Priority::High,
            ..Default::default()
        };

        assert!(dispatcher.send_discord(&request).await.is_ok());
    }
}
