//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use reelcast_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.environment(), config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Validate configuration - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment(),
        provider = ?config.provider(),
        storage = ?config.storage(),
        "Configuration loaded and validated successfully"
    );

    let state = services::initialize_services(&config)?;
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
