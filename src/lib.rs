//! TreasuryFlow API - rate limiting and notification dispatch for a treasury service
//!
//! This crate exposes, over Actix Web and Paperclip:
//! - Fixed-window rate limiting with named presets and a background sweep
//! - Priority-styled notifications to Discord, Telegram and email
//! - TOTP two-factor code verification
//! - Prometheus metrics and an OpenAPI v2 document
//!
//! ## Architecture
//!
//! - `models/` - Data structures and request/response models
//! - `handlers/` - HTTP request handlers for each endpoint
//! - `middleware/` - Request ID and metrics middleware
//! - `services/` - Rate limiter, notification dispatcher, TOTP, metrics
//! - `utils/` - Caller identification and secret redaction
//! - `config/` - Configuration structures and environment loading
//! - `telemetry` - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```no_run
//! use treasuryflow_api::{AppState, create_app};
//! use actix_web::HttpServer;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let state = AppState::from_env()?;
//!     HttpServer::new(move || create_app(&state))
//!         .bind(("127.0.0.1", 8080))?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use config::{
    MetricsConfig, NotificationConfig, RateLimitConfig, RateLimitPreset, ServerConfig, TotpConfig,
};
pub use error::{ApiError, StartupError};
pub use handlers::{AppState, create_app, create_openapi_spec};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{
    DiscordNotificationRequest, DispatchResult, EmailNotificationRequest, NotificationData,
    Priority, RateLimitDecision, RateLimitEntry, TelegramNotificationRequest,
};
pub use services::{
    AppMetrics, Clock, InMemoryRateLimitStore, MockClock, NotificationDispatcher,
    NotificationError, RateLimitStore, RateLimitSweeper, RateLimiter, SystemClock,
};
pub use utils::{extract_client_ip, rate_limit_identifiers, redact_secrets};
