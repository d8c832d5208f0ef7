//! Dashboard command implementation.

use anyhow::{Context, Result};
use insight_config::load_config;
use insight_monitor::{Dashboard, DashboardState};
use std::path::Path;
use tokio::runtime::Handle;
use tracing::info;

use crate::cli::commands::{build_session, session_request};
use crate::cli::DashboardArgs;

pub async fn run(args: DashboardArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    let (asset, request) = session_request(&args.selection)?;
    let session = build_session(&config, args.data.as_deref(), request.include_sentiment)?;

    let mut state = DashboardState::new(asset, request.indicators, request.window)
        .with_sentiment(request.include_sentiment);
    let dashboard = Dashboard::new(config.dashboard.refresh_ms);
    info!(%asset, "Opening dashboard");

    // The dashboard loop blocks; sessions run on the current runtime.
    let handle = Handle::current();
    tokio::task::block_in_place(|| {
        dashboard.run(&mut state, |request| handle.block_on(session.run(&request)))
    })
    .context("Dashboard terminal error")?;

    info!("Dashboard closed");
    Ok(())
}
