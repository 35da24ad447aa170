//! OpenAPI specification generation and app factory.

use crate::{
    config::{MetricsConfig, NotificationConfig, TotpConfig},
    error::{ApiError, StartupError},
    handlers::{
        get_metrics, health, send_discord_notification, send_email_notification,
        send_telegram_notification, verify_totp, version,
    },
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    services::{AppMetrics, NotificationDispatcher, RateLimiter},
};
use actix_web::{App, web::JsonConfig};
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};
use std::sync::Arc;

/// Creates the shared OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "TreasuryFlow API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Rate-limited notification dispatch and two-factor verification for TreasuryFlow.\n\n\
                ## Rate Limiting\n\
                Requests are counted per caller in fixed 60 second windows. A caller is identified by \
                a valid `X-Wallet-Address` header (`0x` followed by 40 hex digits), otherwise by client IP.\n\
                \n\
                | Preset | Requests per window | Endpoints |\n\
                |---|---|---|\n\
                | strict | 5 | `/api/2fa/verify` |\n\
                | standard | 30 | `/api/notifications/*` |\n\
                | relaxed | 100 | `/api/version` |\n\
                \n\
                Limited responses carry `X-RateLimit-Limit`, `X-RateLimit-Remaining` and \
                `X-RateLimit-Reset` (unix seconds). Rejected requests receive `429` with `Retry-After`.\n\
                \n\
                ## Notifications\n\
                Priorities `LOW`, `MEDIUM`, `HIGH` and `URGENT` select the color and emoji of the message. \
                Validation failures return `400`, a missing channel credential `503` and a provider \
                failure `502`, each with a `{\"success\": false, \"error\": \"...\"}` body.\n\
                \n\
                Every response carries an `X-Request-ID` header."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Shared state handed to every worker's [`App`]
///
/// All fields are reference counted so each worker sees the same limiter
/// windows, metrics registry and HTTP client.
#[derive(Clone)]
pub struct AppState {
    pub limiter: web::Data<RateLimiter>,
    pub dispatcher: web::Data<NotificationDispatcher>,
    pub metrics: web::Data<AppMetrics>,
    pub metrics_config: web::Data<MetricsConfig>,
    pub totp_config: web::Data<TotpConfig>,
}

impl AppState {
    pub fn new(
        limiter: Arc<RateLimiter>,
        notification_config: NotificationConfig,
        metrics_config: MetricsConfig,
        totp_config: TotpConfig,
    ) -> Result<Self, StartupError> {
        let metrics = AppMetrics::new()?;
        let dispatcher = NotificationDispatcher::new(notification_config)?.with_metrics(metrics.clone());

        Ok(Self {
            limiter: web::Data::from(limiter),
            dispatcher: web::Data::new(dispatcher),
            metrics: web::Data::new(metrics),
            metrics_config: web::Data::new(metrics_config),
            totp_config: web::Data::new(totp_config),
        })
    }

    /// State with a fresh in-memory limiter and configuration read from the environment
    pub fn from_env() -> Result<Self, StartupError> {
        Self::new(
            Arc::new(RateLimiter::new()),
            NotificationConfig::from_env(),
            MetricsConfig::from_env(),
            TotpConfig::from_env(),
        )
    }

    /// The limiter shared with the sweep task
    pub fn limiter_handle(&self) -> Arc<RateLimiter> {
        self.limiter.clone().into_inner()
    }
}

/// Creates the application with every route, middleware and shared state
///
/// Used by the server for each worker and by integration tests.
pub fn create_app(
    state: &AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let json_config = JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid JSON body: {err}")).into()
    });

    App::new()
        .wrap(MetricsMiddleware)
        .wrap(RequestIdMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(json_config)
        .app_data(state.limiter.clone())
        .app_data(state.dispatcher.clone())
        .app_data(state.metrics.clone())
        .app_data(state.metrics_config.clone())
        .app_data(state.totp_config.clone())
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .service(
            web::resource("/api/notifications/discord")
                .route(web::post().to(send_discord_notification)),
        )
        .service(
            web::resource("/api/notifications/telegram")
                .route(web::post().to(send_telegram_notification)),
        )
        .service(
            web::resource("/api/notifications/email").route(web::post().to(send_email_notification)),
        )
        .service(web::resource("/api/2fa/verify").route(web::post().to(verify_totp)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
