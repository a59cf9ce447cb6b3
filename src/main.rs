//! Cutlist retrieval client
//!
//! # Usage
//!
//! ```bash
//! cutlist retrieve "Show_23.01.01_20-15_ard_90_TVOON_DE.mpg.avi"
//! cutlist retrieve a.avi b.avi --json
//! cutlist check "Show_23.01.01_20-15_ard_90_TVOON_DE.mpg.avi"
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use cutlist_cli::adapters::TomlConfigAdapter;
use cutlist_cli::app::container::DefaultAppContainer;
use cutlist_cli::cli::{commands, Cli, Commands};
use cutlist_cli::config_initialization::initialize_configuration_hierarchy;
use cutlist_cli::utils::logging::init_logging;

/// Main entry point for the cutlist client
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = TomlConfigAdapter::new();
    let settings = initialize_configuration_hierarchy(&config, &cli).await?;
    init_logging(settings.log_level, cli.json_logs);
    if let Some(path) = config.config_file_path() {
        info!("Loaded configuration from: {}", path.display());
    }
    debug!("Using cutlist server {}", settings.server_url);

    let container = DefaultAppContainer::new(&settings)?;

    match cli.command {
        Commands::Retrieve(args) => {
            commands::retrieve(&container, args).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check(args) => {
            let available = commands::check(&container, args).await?;
            Ok(if available {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
