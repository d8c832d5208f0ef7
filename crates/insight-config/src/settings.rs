//! Configuration structures.

use insight_core::error::{InsightError, InsightResult};
use insight_export::ExportConfig;
use insight_signals::SignalConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub market_data: MarketDataSettings,
    #[serde(default)]
    pub fundamentals: FundamentalsSettings,
    #[serde(default)]
    pub news: NewsSettings,
    #[serde(default)]
    pub signals: SignalConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

impl AppConfig {
    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> InsightResult<()> {
        self.signals.validate()?;

        for (section, secs) in [
            ("market_data", self.market_data.timeout_secs),
            ("fundamentals", self.fundamentals.timeout_secs),
            ("news", self.news.timeout_secs),
        ] {
            if secs == 0 {
                return Err(InsightError::Config(format!(
                    "{}.timeout_secs must be positive",
                    section
                )));
            }
        }
        if self.news.page_size == 0 {
            return Err(InsightError::Config("news.page_size must be positive".into()));
        }
        if self.export.chart_width == 0 || self.export.chart_height == 0 || self.export.pie_size == 0 {
            return Err(InsightError::Config("export chart sizes must be positive".into()));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> InsightResult<String> {
        toml::to_string_pretty(self).map_err(|e| InsightError::Serialization(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "crypto-insight".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Price history provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Read bars from this CSV file instead of the chart API.
    pub csv_path: Option<PathBuf>,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 15,
            csv_path: None,
        }
    }
}

impl MarketDataSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fundamentals provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalsSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for FundamentalsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com".to_string(),
            timeout_secs: 15,
        }
    }
}

impl FundamentalsSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// News provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSettings {
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Articles fetched per symbol
    pub page_size: usize,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            api_key_env: "NEWSAPI_KEY".to_string(),
            page_size: 5,
            language: "en".to_string(),
            timeout_secs: 15,
        }
    }
}

impl NewsSettings {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> InsightResult<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(InsightError::Config(format!(
                "news API key not found: set the {} environment variable",
                self.api_key_env
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Terminal dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Input poll interval
    pub refresh_ms: u64,
    /// Log destination while the dashboard owns the terminal
    pub log_file: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_ms: 250,
            log_file: "logs/dashboard.log".to_string(),
        }
    }
}
