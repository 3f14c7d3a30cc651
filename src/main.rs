//! Pomodoro Timer - a persistent single-user elapsed-time tracker over HTTP
//!
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_timer::{
    api::create_router,
    config::Config,
    state::{AppState, TimerEngine},
    storage::{JsonFileStorage, MemoryStorage},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-timer server v{}", env!("CARGO_PKG_VERSION"));

    let engine = if config.in_memory {
        info!("Configuration: host={}, port={}, storage=memory", config.host, config.port);
        TimerEngine::new(MemoryStorage::new())
    } else {
        info!("Configuration: host={}, port={}, storage={}",
              config.host, config.port, config.state_file.display());
        TimerEngine::new(JsonFileStorage::new(&config.state_file))
    };

    // Touch the record so a broken state file fails at startup instead of per request
    let timer = engine.snapshot()?;
    info!("Timer loaded: running={}, banked={:.3}s", timer.is_running, timer.elapsed_seconds);

    let state = Arc::new(AppState::new(engine, config.port, config.host.clone()));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /              - API banner");
    info!("  POST /timer/start   - Start the timer");
    info!("  POST /timer/pause   - Pause the timer");
    info!("  GET  /timer/elapsed - Elapsed time");
    info!("  POST /timer/reset   - Reset the timer");
    info!("  GET  /status        - Timer record and server info");
    info!("  GET  /health        - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
