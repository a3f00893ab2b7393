// SafeSpace Backend Entry Point
// Routes chat messages to escalation, therapist lookup, or supportive replies.

mod capabilities;
mod config;
mod error;
mod routes;
mod state;
mod telemetry;
mod triage;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use capabilities::{support, DemoTherapistDirectory, TwilioEscalation};
use config::AppConfig;
use state::AppState;
use tracing::{info, warn};
use triage::MessageRouter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment still applies.
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    telemetry::init(config.log_format);

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }
    info!(
        demo_mode = config.router.demo_mode,
        real_calls = config.telephony.enable_call,
        "Configuration loaded"
    );
    if !config.router.demo_mode && config.telephony.enable_call && !config.telephony.is_complete() {
        warn!("Real emergency calls are enabled but Twilio configuration is incomplete");
    }

    let router = MessageRouter::new(
        config.router,
        support::from_config(&config.support),
        Box::new(DemoTherapistDirectory),
        Box::new(TwilioEscalation::new(&config.router, &config.telephony)),
    );
    let state = Arc::new(AppState::new(router));
    let app = routes::create_app(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
