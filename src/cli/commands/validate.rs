//! Validate configuration command.

use anyhow::Result;
use insight_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Market data: {}", match &config.market_data.csv_path {
        Some(path) => path.display().to_string(),
        None => config.market_data.base_url.clone(),
    });
    println!("RSI thresholds: {} / {}", config.signals.overbought, config.signals.oversold);
    let key = if config.news.api_key().is_ok() { "set" } else { "missing" };
    println!("News API key ({}): {}", config.news.api_key_env, key);
    println!();
    println!("Resolved configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}
