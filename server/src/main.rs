//! `autoprice-server`: serves the analysis pipeline over HTTP.

use anyhow::{Context, Result};
use autoprice_server::{router, AppState, ServerConfig};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let addr = config.bind_address()?;
    let app = router(AppState::new(config.pipeline()));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Starting autoprice server on {}", addr);
    info!("Health check available at http://{}/health", addr);
    if config.no_charts {
        info!("Chart rendering disabled");
    }

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
