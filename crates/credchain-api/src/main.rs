//! # credchain-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the CredChain registry.
//!
//! Configuration is environment-driven:
//! - `CREDCHAIN_API_ADDR` — bind address (default `127.0.0.1:8080`)
//! - `CREDCHAIN_STATE` — registry snapshot path; loaded at startup if it
//!   exists, written after each successful mutation
//! - `CREDCHAIN_ADMIN` — administrator address for a fresh registry;
//!   required when no snapshot is loaded

use std::net::SocketAddr;
use std::path::PathBuf;

use credchain_api::state::{ApiConfig, AppState};
use credchain_core::AccountAddress;
use credchain_registry::Registry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("CREDCHAIN_API_ADDR")
        .ok()
        .and_then(|a| a.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8080)));

    let snapshot_path = std::env::var("CREDCHAIN_STATE").ok().map(PathBuf::from);

    let registry = load_registry(snapshot_path.as_deref())?;
    tracing::info!(admin = %registry.admin(), count = registry.credential_count(), "registry ready");

    let state = AppState::new(registry, ApiConfig { snapshot_path });
    let app = credchain_api::app(state);

    tracing::info!("CredChain API listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load the registry snapshot if one exists, otherwise create a fresh
/// registry administered by `CREDCHAIN_ADMIN`.
fn load_registry(snapshot_path: Option<&std::path::Path>) -> Result<Registry, Box<dyn std::error::Error>> {
    if let Some(path) = snapshot_path {
        if path.exists() {
            let json = std::fs::read_to_string(path)?;
            let registry: Registry = serde_json::from_str(&json)?;
            tracing::info!(path = %path.display(), "loaded registry snapshot");
            return Ok(registry);
        }
    }

    let admin = std::env::var("CREDCHAIN_ADMIN")
        .map_err(|_| "CREDCHAIN_ADMIN must be set when no snapshot exists")?;
    let admin = AccountAddress::new(admin)?;
    Ok(Registry::new(admin))
}
