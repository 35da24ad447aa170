//! Email channel.
//!
//! No provider is wired in yet: validated messages are rendered and logged.

use super::{NotificationDispatcher, NotificationError, PriorityStyle, require_fields};
use crate::models::{EmailNotificationRequest, NotificationPayload};

const CHANNEL: &str = "email";

impl NotificationDispatcher {
    pub async fn send_email(
        &self,
        request: &EmailNotificationRequest,
    ) -> Result<(), NotificationError> {
        let result = self.deliver_email(request);
        self.record(CHANNEL, &result);
        result
    }

    fn deliver_email(&self, request: &EmailNotificationRequest) -> Result<(), NotificationError> {
        require_fields(&[
            ("to", &request.to),
            ("subject", &request.subject),
            ("message", &request.message),
        ])?;

        let recipient = request.to.trim();
        if !is_plausible_address(recipient) {
            return Err(NotificationError::Validation(
                "Invalid recipient address".to_string(),
            ));
        }

        let payload = NotificationPayload::new(
            &request.subject,
            &request.message,
            request.priority,
            request.data.as_ref(),
        );

        tracing::info!(
            target: "notifications",
            channel = CHANNEL,
            subject = %payload.title,
            priority = %payload.priority,
            demo_mode = self.config.demo_mode,
            "Email notification logged"
        );
        tracing::debug!(target: "notifications", body = %render_email_body(&payload));

        Ok(())
    }
}

/// Plain-text body for an email notification
pub fn render_email_body(payload: &NotificationPayload) -> String {
    let style = PriorityStyle::for_priority(payload.priority);
    let mut body = format!(
        "{} {}\n\n{}\n\nPriority: {}",
        style.emoji, payload.title, payload.message, payload.priority
    );

    if let Some(tx_hash) = payload.data.tx_hash() {
        body.push_str(&format!("\nTransaction: {tx_hash}"));
    }

    if let Some(action_url) = payload.data.action_url() {
        body.push_str(&format!("\nView details: {action_url}"));
    }

    body
}

fn is_plausible_address(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !address.chars().any(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    }
}
