//! Error types for the insight dashboard.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while resolving symbols or fetching data from a collaborator.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    #[error("No data received for {0}")]
    NoData(String),

    #[error("{provider} request failed: {reason}")]
    Upstream { provider: String, reason: String },

    #[error("{provider} returned HTTP {status}")]
    Status { provider: String, status: u16 },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("{0} is not configured")]
    Unavailable(String),

    #[error("Invalid date range: {0}")]
    InvalidWindow(String),
}

impl DataError {
    /// Build a transport failure for the named provider.
    pub fn upstream(provider: &str, reason: impl ToString) -> Self {
        DataError::Upstream {
            provider: provider.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Report export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Csv(String),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("Nothing to export: {0}")]
    Empty(String),
}

/// Result type alias for insight operations.
pub type InsightResult<T> = Result<T, InsightError>;
