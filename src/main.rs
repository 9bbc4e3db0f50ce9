// =============================================================================
// Market Mock API - Main Entry Point
// =============================================================================

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use market_mock::api::{router, AppState};
use market_mock::config::ServerConfig;
use market_mock::dataset::Dataset;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    info!(
        host = %config.host,
        port = config.port,
        environment = %config.environment,
        "market mock API starting"
    );

    // ── 2. Dataset (immutable for the lifetime of the process) ───────────
    let dataset = Dataset::builtin().context("failed to load builtin stock dataset")?;

    let state = Arc::new(AppState {
        dataset,
        config: config.clone(),
    });

    // ── 3. Serve ─────────────────────────────────────────────────────────
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    info!(addr = %config.bind_addr(), "market data API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("market mock API shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install ctrl-c handler");
        return;
    }
    warn!("shutdown signal received, stopping");
}
