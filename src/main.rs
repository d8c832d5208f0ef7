//! Crypto insight CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use insight_config::load_config;
use insight_monitor::setup_logging;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands report a bad config file themselves once logging is up
    let config = load_config(&cli.config).unwrap_or_default();

    // The dashboard owns the terminal, so its logs always go to a file
    let log_file = cli.log_file.clone().or_else(|| match cli.command {
        Commands::Dashboard(_) => Some(PathBuf::from(&config.dashboard.log_file)),
        _ => config.logging.file.as_ref().map(PathBuf::from),
    });
    let json = cli.json_logs || config.logging.is_json();
    let _guard = setup_logging(cli.log_level.as_str(), json, log_file.as_deref())
        .context("Failed to set up logging")?;

    // Execute command
    match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::run(args, &cli.config).await,
        Commands::Dashboard(args) => cli::commands::dashboard::run(args, &cli.config).await,
        Commands::Symbols => cli::commands::symbols::run().await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
