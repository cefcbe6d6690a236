//! Countdown - a countdown timer controlled over HTTP
//!
//! This is the main entry point for the countdown server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown::{
    api::create_router,
    config::Config,
    display::format_time_interval,
    state::AppState,
    tasks::{alert_task, countdown_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    let selection = config.initial_selection().map_err(anyhow::Error::msg)?;

    // Create application state and the countdown task that owns the timer
    let (state, commands_rx) = AppState::new(config.port, config.host.clone(), config.tick_interval());
    let state = Arc::new(state);

    // Start the background tasks
    tokio::spawn(alert_task(Arc::clone(&state)));
    tokio::spawn(countdown_task(Arc::clone(&state), commands_rx));

    state.set_picker(selection).await.map_err(anyhow::Error::msg)?;
    info!("Initial duration: {}", format_time_interval(selection.duration()));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /duration         - Set duration from {{\"minutes\", \"seconds\"}}");
    info!("  POST /duration/seconds - Set duration from {{\"seconds\"}}");
    info!("  POST /start            - Start the countdown");
    info!("  POST /reset            - Reset the countdown");
    info!("  GET  /status           - Countdown, alert and server status");
    info!("  GET  /picker           - Picker rows");
    info!("  POST /alert/dismiss    - Dismiss the finished alert");
    info!("  GET  /health           - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result.map_err(|e| anyhow::anyhow!("Failed to install signal handler: {}", e))?;
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
