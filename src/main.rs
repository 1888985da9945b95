//! Validation Service (v1)
//!
//! Stores files on a shared volume and proxies calculation requests to a
//! downstream calculation service.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │              VALIDATION SERVICE               │
//!                        │                                               │
//!   POST /store-file     │  ┌─────────┐   ┌──────────────────┐           │
//!   ─────────────────────┼─▶│  http   │──▶│ FileStoreHandler │──▶ write ─┼──▶ <PV_PATH>/<file>
//!                        │  │ server  │   └──────────────────┘           │
//!   POST /calculate      │  │         │   ┌──────────────────┐           │
//!   ─────────────────────┼─▶│         │──▶│ CalculationProxy │──▶ POST ──┼──▶ CALC_SERVICE_URL
//!                        │  └─────────┘   └────────┬─────────┘           │
//!                        │                         │ on failure          │
//!                        │                         └──▶ exists check ────┼──▶ <PV_PATH>/<file>
//!                        │                                               │
//!                        │  config · observability · lifecycle           │
//!                        └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use validation_service::config::load_config;
use validation_service::lifecycle::startup;
use validation_service::observability::logging;

#[derive(Parser)]
#[command(name = "validation-service")]
#[command(about = "File storage and calculation proxy", long_about = None)]
struct Args {
    /// Optional TOML config file. CALC_SERVICE_URL, PV_PATH and PORT override it.
    #[arg(short, long, env = "VALIDATION_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    logging::init(&config.observability);

    tracing::info!("validation-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        downstream = %config.downstream.url,
        storage_root = %config.storage.root.display(),
        status_policy = ?config.http.status_policy,
        "Configuration loaded"
    );

    startup::serve(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
