//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use redactor_core::Config;
use std::sync::Arc;

/// Validate config, start telemetry, build the shared clients and the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        project_id = %config.project_id(),
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let state = services::initialize_services(&config)?;
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
