//! Product API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace ─▶ logging filter ─▶ auth filter
//!                                                                  │
//!                                                                  ▼
//!                                                           ┌────────────┐
//!                                                           │   router   │
//!                                                           └─────┬──────┘
//!                                                                 ▼
//!     Client Response                                       ┌────────────┐
//!     ◀────────────── JSON body / error translation ◀───────│  handlers  │
//!                                                           └─────┬──────┘
//!                                                                 ▼
//!                                                         ProductStore (Mutex<Vec>)
//! ```

use std::path::PathBuf;

use clap::Parser;
use product_api::config;
use product_api::lifecycle::startup;
use product_api::observability::logging;

#[derive(Parser)]
#[command(name = "product-api")]
#[command(about = "In-memory product catalogue HTTP API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "PRODUCT_API_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config file and PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logging::init(&config.observability)?;
    tracing::info!("product-api v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
