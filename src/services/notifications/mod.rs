//! Notification dispatch to Discord, Telegram, and email.
//!
//! Each channel validates its request before any I/O, renders the
//! priority-tagged message, and makes at most one outbound call. Failed
//! deliveries are not retried; callers decide whether to retry or escalate.

mod discord;
mod email;
mod error;
mod style;
mod telegram;

pub use discord::render_discord_payload;
pub use email::render_email_body;
pub use error::NotificationError;
pub use style::*;
pub use telegram::render_telegram_text;

use crate::{
    config::NotificationConfig,
    models::{NotificationData, NotificationPayload, Priority},
    services::metrics::AppMetrics,
    utils::redact::redact_secrets,
};
use reqwest::{Client, Response};
use url::Url;

/// Longest provider error body carried into an error message
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Sends notifications over the configured channels
pub struct NotificationDispatcher {
    client: Client,
    config: NotificationConfig,
    metrics: Option<AppMetrics>,
}

impl NotificationDispatcher {
    /// Build a dispatcher with its own HTTP client
    pub fn new(config: NotificationConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("treasuryflow-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            metrics: None,
        })
    }

    /// Count dispatch outcomes in `metrics`
    pub fn with_metrics(mut self, metrics: AppMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    fn record(&self, channel: &'static str, result: &Result<(), NotificationError>) {
        let outcome = match result {
            Ok(()) if self.config.demo_mode => "demo",
            Ok(()) => "delivered",
            Err(err) => err.outcome_label(),
        };

        match result {
            Ok(()) => tracing::info!(target: "notifications", channel, outcome, "Notification dispatched"),
            Err(NotificationError::Validation(reason)) => {
                tracing::debug!(target: "notifications", channel, %reason, "Notification rejected")
            }
            Err(err) => tracing::error!(target: "notifications", channel, error = %err, "Notification dispatch failed"),
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_notification(channel, outcome);
        }
    }
}

impl NotificationPayload {
    pub fn new(
        title: &str,
        message: &str,
        priority: Priority,
        data: Option<&NotificationData>,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            message: message.trim().to_string(),
            priority,
            data: data.cloned().unwrap_or_default(),
        }
    }
}

/// Reject the request if any named field is blank
fn require_fields(fields: &[(&str, &str)]) -> Result<(), NotificationError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(NotificationError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Parse an outbound endpoint, accepting only http(s)
fn parse_http_url(field: &str, raw: &str) -> Result<Url, NotificationError> {
    let url = Url::parse(raw.trim())
        .map_err(|_| NotificationError::Validation(format!("Invalid {field}")))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(NotificationError::Validation(format!(
            "Invalid {field}: expected an http(s) URL"
        ))),
    }
}

/// Turn a non-2xx response into an upstream error
async fn ensure_success(channel: &'static str, response: Response) -> Result<Response, NotificationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "No response body".to_string());
    let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();

    Err(NotificationError::Upstream {
        channel,
        status: status.as_u16(),
        body: redact_secrets(&body),
    })
}
