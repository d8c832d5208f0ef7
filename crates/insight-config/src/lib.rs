//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, DashboardSettings, FundamentalsSettings, LoggingConfig,
    MarketDataSettings, NewsSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables prefixed `INSIGHT` override file values, with `__`
/// separating sections, e.g. `INSIGHT__NEWS__PAGE_SIZE=10`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("INSIGHT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
