use actix_web::HttpServer;
use treasuryflow_api::{
    AppState, RateLimitSweeper, ServerConfig, create_app,
    telemetry::{LogFormat, init_tracing},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = init_tracing(LogFormat::from_env()) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let server_config = ServerConfig::from_env();
    let state = AppState::from_env()?;

    if state.dispatcher.config().demo_mode {
        tracing::warn!("Notification demo mode enabled: no messages will be delivered");
    }
    if !state.dispatcher.config().telegram_configured() {
        tracing::info!("TELEGRAM_BOT_TOKEN not set; Telegram notifications will return 503");
    }

    let sweeper = RateLimitSweeper::start(
        state.limiter_handle(),
        server_config.cleanup_interval(),
        Some(state.metrics.get_ref().clone()),
    );

    let (host, port) = server_config.bind_address();
    tracing::info!(
        %host,
        port,
        version = env!("CARGO_PKG_VERSION"),
        cleanup_interval_secs = server_config.cleanup_interval_seconds,
        "Starting TreasuryFlow API"
    );

    let server_state = state.clone();
    let result = HttpServer::new(move || create_app(&server_state))
        .bind((host, port))?
        .run()
        .await;

    if let Err(e) = sweeper.shutdown().await {
        tracing::error!(error = %e, "Rate-limit sweeper did not shut down cleanly");
    }
    tracing::info!("TreasuryFlow API stopped");

    result
}
