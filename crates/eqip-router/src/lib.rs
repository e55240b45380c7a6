//! Eqip Router
//!
//! JSON-over-HTTP binding of the attribution and ownership pipeline.
//! Field names match the shapes existing consumers send and read.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::RouterConfig;
use eqip_pipeline::{Pipeline, PipelineError};
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Router error
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Pipeline could not be built from the configuration
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the tracing subscriber (`RUST_LOG` overrides the `info` default)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (tests, embedding binaries)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Start the Router HTTP server
///
/// Builds the pipeline from the configuration and serves until the
/// listener fails.
pub async fn start_server(config: RouterConfig) -> Result<(), RouterError> {
    init_tracing();

    info!("Starting Eqip Router");
    info!("Bind address: {}", config.bind_addr());
    info!(
        "Default total shares: {}, strict policy types: {}",
        config.pipeline.allocation.default_total_shares, config.pipeline.allocation.strict_policy_types
    );

    let pipeline = Pipeline::new(config.pipeline.clone())?;
    let app = create_router(AppState::new(pipeline));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Router listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| RouterError::Server(e.to_string()))?;

    Ok(())
}
