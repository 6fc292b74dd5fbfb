//! # Roster Server
//!
//! Main entry point: loads configuration, installs logging, wires the
//! record store and cache behind the HTTP API, and serves until shutdown.

use roster_config::ConfigLoader;
use roster_core::RosterResult;
use roster_server::{app::App, logging::init_logging, startup::print_banner};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_config(),
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();

    info!("Starting Roster server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: roster_config::AppConfig) -> RosterResult<()> {
    App::build(config).await?.run().await
}
