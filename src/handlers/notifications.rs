//! Notification dispatch endpoint handlers.
//!
//! All three channels share the standard rate-limit preset. A delivered
//! notification answers `{"success": true}`; failures are rendered by
//! [`ApiError`](crate::error::ApiError).

use crate::{
    config::RateLimitPreset,
    error::ApiError,
    handlers::rate_limit::{enforce_rate_limit, ok_with_limits},
    models::{
        DiscordNotificationRequest, DispatchResult, EmailNotificationRequest,
        TelegramNotificationRequest,
    },
    services::NotificationDispatcher,
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;

/// Send a notification to a Discord webhook
#[api_v2_operation(
    summary = "Discord Notification",
    description = "Posts a priority-styled embed to a Discord webhook. The request webhook_url overrides the configured default.",
    tags("Notifications"),
    responses(
        (status = 200, description = "Notification delivered", body = DispatchResult),
        (status = 400, description = "Missing or invalid fields"),
        (status = 429, description = "Too Many Requests"),
        (status = 502, description = "Discord rejected the webhook call")
    )
)]
pub async fn send_discord_notification(
    req: HttpRequest,
    dispatcher: web::Data<NotificationDispatcher>,
    payload: web::Json<DiscordNotificationRequest>,
) -> Result<HttpResponse, Error> {
    let decision = enforce_rate_limit(&req, RateLimitPreset::Standard)?;
    dispatcher
        .send_discord(&payload)
        .await
        .map_err(ApiError::from)?;
    Ok(ok_with_limits(decision.as_ref()).json(DispatchResult::delivered()))
}

/// Send a notification through the Telegram Bot API
#[api_v2_operation(
    summary = "Telegram Notification",
    description = "Sends a Markdown message to a Telegram chat using the configured bot token.",
    tags("Notifications"),
    responses(
        (status = 200, description = "Notification delivered", body = DispatchResult),
        (status = 400, description = "Missing or invalid fields"),
        (status = 429, description = "Too Many Requests"),
        (status = 502, description = "Telegram rejected the message"),
        (status = 503, description = "Telegram bot token not configured")
    )
)]
pub async fn send_telegram_notification(
    req: HttpRequest,
    dispatcher: web::Data<NotificationDispatcher>,
    payload: web::Json<TelegramNotificationRequest>,
) -> Result<HttpResponse, Error> {
    let decision = enforce_rate_limit(&req, RateLimitPreset::Standard)?;
    dispatcher
        .send_telegram(&payload)
        .await
        .map_err(ApiError::from)?;
    Ok(ok_with_limits(decision.as_ref()).json(DispatchResult::delivered()))
}

/// Record an email notification
#[api_v2_operation(
    summary = "Email Notification",
    description = "Validates and logs an email notification. No mail provider is contacted.",
    tags("Notifications"),
    responses(
        (status = 200, description = "Notification accepted", body = DispatchResult),
        (status = 400, description = "Missing or invalid fields"),
        (status = 429, description = "Too Many Requests")
    )
)]
pub async fn send_email_notification(
    req: HttpRequest,
    dispatcher: web::Data<NotificationDispatcher>,
    payload: web::Json<EmailNotificationRequest>,
) -> Result<HttpResponse, Error> {
    let decision = enforce_rate_limit(&req, RateLimitPreset::Standard)?;
    dispatcher
        .send_email(&payload)
        .await
        .map_err(ApiError::from)?;
    Ok(ok_with_limits(decision.as_ref()).json(DispatchResult::delivered()))
}
