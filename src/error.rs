//! API error type and its HTTP rendering.

use crate::{
    models::RateLimitDecision,
    services::{notifications::NotificationError, totp::TotpError},
};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

/// Errors surfaced by request handlers
///
/// Every variant is contained to the request that produced it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited(RateLimitDecision),

    /// A channel or component has no credentials
    #[error("{0}")]
    NotConfigured(String),

    /// The third-party provider rejected or failed the call
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

/// Failures while assembling application state at start-up
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to register metrics: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl From<StartupError> for std::io::Error {
    fn from(err: StartupError) -> Self {
        std::io::Error::other(err)
    }
}

impl From<NotificationError> for ApiError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::Validation(msg) => ApiError::Validation(msg),
            NotificationError::NotConfigured(_) => ApiError::NotConfigured(err.to_string()),
            NotificationError::Upstream { .. } | NotificationError::Transport { .. } => {
                ApiError::Upstream(err.to_string())
            }
        }
    }
}

impl From<TotpError> for ApiError {
    fn from(err: TotpError) -> Self {
        match err {
            TotpError::InvalidSecretEncoding | TotpError::SecretTooShort { .. } => {
                ApiError::Validation(err.to_string())
            }
            TotpError::InvalidKey => ApiError::Internal(err.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());

        match self {
            ApiError::RateLimited(decision) => {
                for header in decision.headers() {
                    builder.insert_header(header);
                }
                builder.json(serde_json::json!({
                    "error": "Too Many Requests",
                    "message": self.to_string(),
                    "retry_after": decision.retry_after_secs.unwrap_or(0),
                }))
            }
            _ => builder.json(serde_json::json!({
                "success": false,
                "error": self.to_string(),
            })),
        }
    }
}
