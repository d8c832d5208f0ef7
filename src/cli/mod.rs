//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "insight")]
#[command(author, version, about = "Cryptocurrency technical, fundamental and sentiment analysis")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Write logs to this file instead of stdout
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a full analysis and print the report
    Analyze(AnalyzeArgs),
    /// Open the interactive terminal dashboard
    Dashboard(DashboardArgs),
    /// List supported symbols and indicators
    Symbols,
    /// Validate configuration
    ValidateConfig,
}

/// Symbol, indicators and date range shared by `analyze` and `dashboard`.
#[derive(clap::Args)]
pub struct SelectionArgs {
    /// Symbol to analyze (BTC, ETH, XRP)
    #[arg(short, long, default_value = "BTC")]
    pub symbol: String,

    /// Indicators (comma-separated), e.g. RSI,MACD,SMA50
    #[arg(short, long, value_delimiter = ',')]
    pub indicators: Vec<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub end: Option<String>,

    /// Skip the news sentiment stage
    #[arg(long)]
    pub skip_sentiment: bool,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Data file (CSV) to use instead of the market data API
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Render the technical chart to this file (.svg or .png)
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Write the sentiment spreadsheet and document to this directory
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Data file (CSV) to use instead of the market data API
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_args() {
        let cli = Cli::try_parse_from([
            "insight",
            "analyze",
            "--symbol",
            "eth",
            "--indicators",
            "RSI,MACD,sma-50",
            "--start",
            "2025-01-01",
            "--output",
            "json",
            "--skip-sentiment",
        ])
        .unwrap();

        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.selection.symbol, "eth");
        assert_eq!(args.selection.indicators, vec!["RSI", "MACD", "sma-50"]);
        assert_eq!(args.selection.start.as_deref(), Some("2025-01-01"));
        assert!(args.selection.end.is_none());
        assert!(args.selection.skip_sentiment);
        assert!(args.output == OutputFormat::Json);
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "insight",
            "--log-level",
            "debug",
            "--log-file",
            "logs/x.log",
            "symbols",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_str(), "debug");
        assert_eq!(cli.log_file, Some(PathBuf::from("logs/x.log")));
        assert!(matches!(cli.command, Commands::Symbols));
    }
}
