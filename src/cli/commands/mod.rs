//! CLI command implementations.

pub mod analyze;
pub mod dashboard;
pub mod symbols;
pub mod validate;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use insight_config::AppConfig;
use insight_core::traits::MarketDataSource;
use insight_core::types::{AnalysisWindow, Asset};
use insight_data::{
    CoinGeckoSource, CsvDataSource, NewsApiSource, UnconfiguredOnchainSource, YahooChartSource,
};
use insight_session::{AnalysisSession, SessionRequest};
use insight_signals::{IndicatorRequest, SignalEngine};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::cli::SelectionArgs;

fn parse_date(value: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("Invalid {} date '{}', expected YYYY-MM-DD", flag, s))
        })
        .transpose()
}

/// Validate the selection and turn it into a session request.
pub(crate) fn session_request(args: &SelectionArgs) -> Result<(Asset, SessionRequest)> {
    let asset: Asset = args.symbol.parse().context("Unsupported symbol")?;
    let window = AnalysisWindow::new(
        parse_date(args.start.as_deref(), "--start")?,
        parse_date(args.end.as_deref(), "--end")?,
    );
    window
        .validate(Utc::now().date_naive())
        .context("Invalid --start/--end")?;
    let (indicators, _ignored) = IndicatorRequest::parse(&args.indicators);

    let request = SessionRequest::new(asset.symbol(), indicators)
        .with_window(window)
        .with_sentiment(!args.skip_sentiment);
    Ok((asset, request))
}

/// Wire the providers named by the configuration into a session.
pub(crate) fn build_session(
    config: &AppConfig,
    data: Option<&Path>,
    include_sentiment: bool,
) -> Result<AnalysisSession> {
    config.validate().context("Invalid configuration")?;

    let market: Arc<dyn MarketDataSource> =
        match data.or(config.market_data.csv_path.as_deref()) {
            Some(path) => Arc::new(
                CsvDataSource::new(path)
                    .with_context(|| format!("Failed to open data file {}", path.display()))?,
            ),
            None => Arc::new(YahooChartSource::new(
                &config.market_data.base_url,
                config.market_data.timeout(),
            )?),
        };
    info!(source = market.name(), "Market data source ready");

    let engine = SignalEngine::with_config(market, config.signals.clone());
    let fundamentals = CoinGeckoSource::new(
        &config.fundamentals.base_url,
        config.fundamentals.timeout(),
    )?;
    let mut session = AnalysisSession::new(
        engine,
        Arc::new(fundamentals),
        Arc::new(UnconfiguredOnchainSource),
    );

    if include_sentiment {
        let key = config
            .news
            .api_key()
            .context("News sentiment needs an API key (or pass --skip-sentiment)")?;
        let news = NewsApiSource::new(&config.news.base_url, key, config.news.timeout())?
            .with_language(&config.news.language);
        session = session.with_news(Arc::new(news), config.news.page_size);
    }

    Ok(session)
}
