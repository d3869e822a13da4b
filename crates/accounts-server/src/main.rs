//! # Accounts Server
//!
//! Starts the accounts backend: loads configuration, installs logging,
//! connects and migrates the database, wires the handlers and waits for a
//! shutdown signal.

use accounts_config::{ConfigLoader, ObservabilityConfig};
use accounts_core::AccountsResult;
use accounts_server::app::App;
use accounts_server::startup::{init_logging, print_startup_info, shutdown_signal};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config_loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config_loader).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config_loader: ConfigLoader) -> AccountsResult<()> {
    let config = config_loader.get().await;
    init_logging(&config.observability);

    info!("Starting accounts server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let app = App::start(config).await?;
    print_startup_info(app.config());
    info!("Ready");

    shutdown_signal().await;
    app.shutdown().await;

    Ok(())
}
