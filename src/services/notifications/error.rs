//! Notification dispatch errors.

use crate::{models::DispatchResult, utils::redact::redact_secrets};

/// Why a notification was not delivered
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// Missing or malformed request fields; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// The channel has no credentials configured
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    /// The provider answered with a failure
    #[error("{channel} returned status {status}: {body}")]
    Upstream {
        channel: &'static str,
        status: u16,
        body: String,
    },

    /// The request never produced a response (DNS, connect, timeout)
    #[error("{channel} request failed: {message}")]
    Transport {
        channel: &'static str,
        message: String,
    },
}

impl NotificationError {
    pub(crate) fn transport(channel: &'static str, err: &reqwest::Error) -> Self {
        // reqwest includes the request URL, which may embed a bot token.
        NotificationError::Transport {
            channel,
            message: redact_secrets(&err.to_string()),
        }
    }

    /// Label used for the `outcome` metric dimension
    pub fn outcome_label(&self) -> &'static str {
        match self {
            NotificationError::Validation(_) => "invalid",
            NotificationError::NotConfigured(_) => "not_configured",
            NotificationError::Upstream { .. } | NotificationError::Transport { .. } => "failed",
        }
    }
}

impl From<Result<(), NotificationError>> for DispatchResult {
    fn from(result: Result<(), NotificationError>) -> Self {
        match result {
            Ok(()) => DispatchResult::delivered(),
            Err(err) => DispatchResult::failed(err.to_string()),
        }
    }
}
