//! Storial API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p storial-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env`.

use anyhow::Context;
use storial_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = format!("{e:#}"), "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // No environment yet, so log with the defaults
            let _ = try_init_tracing();
            return Err(e).context("Failed to load configuration");
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        "Starting Storial API server"
    );

    storial_api::run(config).await.context("Server error")
}
