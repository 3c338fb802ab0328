//! Application setup and initialization
//!
//! All initialization logic lives here rather than in main.rs so the router
//! can be built the same way in tests.

pub mod database;
pub mod routes;
pub mod server;
pub mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use taskboard_core::Config;

use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    // The emitter normalizes against the environment captured here; nothing
    // re-reads the process environment after this point.
    crate::error::init_environment(config.environment);

    let pool = database::setup_database(&config).await?;

    let state = Arc::new(AppState::new(config.clone(), pool));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
