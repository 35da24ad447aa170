//! Telegram Bot API channel.

use super::{NotificationDispatcher, NotificationError, PriorityStyle, ensure_success, require_fields};
use crate::models::{NotificationPayload, TelegramNotificationRequest};
use serde::Deserialize;
use serde_json::json;

const CHANNEL: &str = "telegram";

/// The subset of a Bot API reply we inspect
#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl NotificationDispatcher {
    /// Send a Markdown message through the Telegram Bot API
    ///
    /// Without a configured bot token this fails with
    /// [`NotificationError::NotConfigured`]; nothing is sent.
    pub async fn send_telegram(
        &self,
        request: &TelegramNotificationRequest,
    ) -> Result<(), NotificationError> {
        let result = self.deliver_telegram(request).await;
        self.record(CHANNEL, &result);
        result
    }

    async fn deliver_telegram(
        &self,
        request: &TelegramNotificationRequest,
    ) -> Result<(), NotificationError> {
        require_fields(&[
            ("chat_id", &request.chat_id),
            ("title", &request.title),
            ("message", &request.message),
        ])?;

        let payload = NotificationPayload::new(
            &request.title,
            &request.message,
            request.priority,
            request.data.as_ref(),
        );
        let text = render_telegram_text(&payload);

        if self.config.demo_mode {
            tracing::info!(
                target: "notifications",
                channel = CHANNEL,
                chat_id = %request.chat_id.trim(),
                priority = %payload.priority,
                "Demo mode: Telegram notification not sent"
            );
            return Ok(());
        }

        let token = self
            .config
            .telegram_bot_token
            .as_deref()
            .ok_or(NotificationError::NotConfigured("Telegram bot token"))?;
        let url = format!("{}/bot{}/sendMessage", self.config.telegram_api_base, token);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": request.chat_id.trim(),
                "text": text,
                "parse_mode": "Markdown",
                "disable_web_page_preview": true,
            }))
            .send()
            .await
            .map_err(|e| NotificationError::transport(CHANNEL, &e))?;

        let response = ensure_success(CHANNEL, response).await?;
        let status = response.status().as_u16();

        // A 2xx without a parseable body is treated as delivered.
        match response.json::<TelegramApiResponse>().await {
            Ok(reply) if !reply.ok => Err(NotificationError::Upstream {
                channel: CHANNEL,
                status,
                body: reply
                    .description
                    .unwrap_or_else(|| "Telegram API reported failure".to_string()),
            }),
            _ => Ok(()),
        }
    }
}

/// Render the Markdown message body
pub fn render_telegram_text(payload: &NotificationPayload) -> String {
    let style = PriorityStyle::for_priority(payload.priority);
    let mut text = format!("{} *{}*\n\n{}", style.emoji, payload.title, payload.message);

    if let Some(tx_hash) = payload.data.tx_hash() {
        text.push_str(&format!("\n\n🔗 Transaction: `{tx_hash}`"));
    }

    if let Some(action_url) = payload.data.action_url() {
        text.push_str(&format!("\n\n[View Details]({action_url})"));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::NotificationConfig,
        models::{DispatchResult, NotificationData, Priority},
    };

    fn request() -> TelegramNotificationRequest {
        TelegramNotificationRequest {
            chat_id: "-100200300".to_string(),
            title: "Approval needed".to_string(),
            message: "Payment #12 awaits a second signer".to_string(),
            priority: Priority::High,
            data: None,
        }
    }

    #[test]
    fn test_render_plain_message() {
        let payload = NotificationPayload::new("Approval needed", "Body", Priority::High, None);
        assert_eq!(render_telegram_text(&payload), "⚠️ *Approval needed*\n\nBody");
    }

    #[test]
    fn test_render_with_transaction_and_link() {
        let data = NotificationData {
            tx_hash: Some("0xfeed".to_string()),
            action_url: Some("https://app.treasuryflow.io/approvals/12".to_string()),
        };
        let payload = NotificationPayload::new("Sent", "Done", Priority::Medium, Some(&data));

        assert_eq!(
            render_telegram_text(&payload),
            "ℹ️ *Sent*\n\nDone\n\n🔗 Transaction: `0xfeed`\n\n[View Details](https://app.treasuryflow.io/approvals/12)"
        );
    }

    #[tokio::test]
    async fn test_missing_token_reports_not_configured() {
        let dispatcher = NotificationDispatcher::new(NotificationConfig::default()).unwrap();

        let result = dispatcher.send_telegram(&request()).await;
        assert!(matches!(result, Err(NotificationError::NotConfigured(_))));

        let outcome = DispatchResult::from(result);
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Telegram bot token not configured"));
    }

    #[tokio::test]
    async fn test_validation_precedes_configuration_check() {
        let dispatcher = NotificationDispatcher::new(NotificationConfig::default()).unwrap();
        let request = TelegramNotificationRequest {
            chat_id: String::new(),
            ..request()
        };

        let err = dispatcher.send_telegram(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: chat_id");
    }
}
