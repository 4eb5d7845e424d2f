//! FINS Catalog Service - species lookup over the FINS reference API
//!
//! Resolves free-text and attribute queries to species and serves fully
//! aggregated species records.

use fins_catalog::server::{start_server, ServerState, SharedState};
use fins_catalog::{Catalog, CatalogError, Config, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("fins_catalog=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting FINS Catalog Service...");

    let config = Config::from_env()?;
    info!("Port: {}", config.port);
    info!("FINS API: {}", config.api_base_url);
    info!("Relay: {:?}", config.relay);

    let client = config.client()?;
    let catalog = Catalog::with_featured(client, config.featured.clone());

    let state: SharedState = Arc::new(ServerState::new(catalog));

    // Start HTTP server (blocking)
    start_server(state, config.port)
        .await
        .map_err(|e| CatalogError::Config(format!("Server error: {}", e)))?;

    Ok(())
}
