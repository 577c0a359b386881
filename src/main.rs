//! Diviswap edge service.
//!
//! Sits in front of the exchange frontend and answers the requests that
//! never need the frontend itself.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────────┐
//!                      │                     EDGE SERVICE                     │
//!                      │                                                      │
//!   Client Request     │  ┌──────────┐   ┌────────────┐   ┌──────────────┐    │
//!   ───────────────────┼─▶│request id│──▶│  redirect  │──▶│   handlers   │    │
//!                      │  │ + trace  │   │ middleware │   │ healthz/chain│    │
//!                      │  └──────────┘   └─────┬──────┘   │  identicon   │    │
//!                      │                       │          └──────┬───────┘    │
//!   3xx Location       │                       │                 │ fallback   │
//!   ◀──────────────────┼───────────────────────┘                 ▼            │
//!                      │                                 ┌──────────────┐     │
//!   Client Response    │                                 │ pass-through │─────┼──▶ Frontend
//!   ◀──────────────────┼─────────────────────────────────│  / 404 page  │◀────┼─── Origin
//!                      │                                 └──────────────┘     │
//!                      │  ┌────────────────────────────────────────────────┐  │
//!                      │  │ config · chain tables · observability · signals│  │
//!                      │  └────────────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use diviswap_edge::config::{load_config, EdgeConfig};
use diviswap_edge::lifecycle::startup;
use diviswap_edge::observability::logging;

#[derive(Parser)]
#[command(name = "diviswap-edge")]
#[command(about = "Edge service for the Diviswap frontend", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };

    logging::init(&config.observability)?;

    tracing::info!("diviswap-edge v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?args.config,
        bind_address = %config.listener.bind_address,
        redirect_rules = config.redirects.rules.len(),
        network = %config.chain.network,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
