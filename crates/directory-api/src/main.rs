//! Member directory API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p directory-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use directory_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Tracing needs the environment before anything else logs
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.api.address(),
        database = config.has_database(),
        "Configuration loaded"
    );

    if let Err(e) = directory_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
