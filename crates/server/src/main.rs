//! HTTP server for stress-aware wellness recommendations.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{build_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,catalogs=debug,llm_client=debug")),
        )
        .init();

    let config = ServerConfig::parse();
    info!("Starting wellness recommendation server");

    let orchestrator = config.service.build_orchestrator()?;
    let app = build_router(AppState::new(orchestrator));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
