//! Application setup and initialization.

pub mod database;
pub mod routes;
pub mod seed;
pub mod server;
pub mod telemetry;

use crate::state::AppState;
use anyhow::{Context, Result};
use showroom_core::Config;
use std::sync::Arc;

/// Initialize the entire application.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;
    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;

    let storage = showroom_storage::create_storage(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {}", e))?;
    tracing::info!(backend = %config.storage_backend, "Storage initialized");

    let state = Arc::new(AppState::new(config.clone(), pool, storage));

    seed::ensure_root_admin(&state).await?;

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
