//! The full analysis run.

use insight_core::error::DataError;
use insight_core::traits::{FundamentalsSource, NewsSource, OnchainSource};
use insight_core::types::{AnalysisWindow, Asset, Fundamentals, OnchainMetric};
use insight_sentiment::{SentimentAnalyzer, SentimentDataset};
use insight_signals::{IndicatorRequest, SignalEngine};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info};

use crate::report::SessionReport;

/// Result of one isolated stage.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum StageOutcome<T> {
    Ready(T),
    Failed { message: String },
    /// The stage was not requested for this run.
    Skipped,
}

impl<T> StageOutcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            StageOutcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StageOutcome::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, StageOutcome::Ready(_))
    }
}

/// Errors a stage can end with besides provider failures.
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("no news articles received")]
    NoArticles,
}

/// Inputs of one run, as selected in the dashboard or on the command line.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub symbol: String,
    pub indicators: IndicatorRequest,
    pub window: AnalysisWindow,
    pub include_sentiment: bool,
}

impl SessionRequest {
    pub fn new(symbol: impl Into<String>, indicators: IndicatorRequest) -> Self {
        Self {
            symbol: symbol.into(),
            indicators,
            window: AnalysisWindow::trailing(),
            include_sentiment: true,
        }
    }

    pub fn with_window(mut self, window: AnalysisWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_sentiment(mut self, include: bool) -> Self {
        self.include_sentiment = include;
        self
    }
}

struct NewsStage {
    source: Arc<dyn NewsSource>,
    limit: usize,
}

/// Runs the four analysis stages against the configured collaborators.
pub struct AnalysisSession {
    engine: SignalEngine,
    fundamentals: Arc<dyn FundamentalsSource>,
    onchain: Arc<dyn OnchainSource>,
    news: Option<NewsStage>,
    analyzer: SentimentAnalyzer,
}

impl AnalysisSession {
    pub fn new(
        engine: SignalEngine,
        fundamentals: Arc<dyn FundamentalsSource>,
        onchain: Arc<dyn OnchainSource>,
    ) -> Self {
        Self {
            engine,
            fundamentals,
            onchain,
            news: None,
            analyzer: SentimentAnalyzer::new(),
        }
    }

    /// Enable the sentiment stage with up to `limit` articles per run.
    pub fn with_news(mut self, source: Arc<dyn NewsSource>, limit: usize) -> Self {
        self.news = Some(NewsStage { source, limit });
        self
    }

    /// Run every stage in order. Each stage catches its own error.
    pub async fn run(&self, request: &SessionRequest) -> SessionReport {
        let symbol = request.symbol.as_str();
        info!(%symbol, indicators = %request.indicators, "Starting analysis session");

        let technical = stage(
            "technical",
            self.engine
                .analyze(symbol, &request.indicators, request.window),
        )
        .await;

        let fundamentals = stage("fundamentals", self.fetch_fundamentals(symbol)).await;

        let sentiment = match &self.news {
            Some(news) if request.include_sentiment => {
                stage("sentiment", self.score_news(news, symbol)).await
            }
            _ => {
                info!(stage = "sentiment", "Stage skipped");
                StageOutcome::Skipped
            }
        };

        let onchain = stage("onchain", self.fetch_onchain(symbol)).await;

        SessionReport {
            symbol: symbol.to_string(),
            technical,
            fundamentals,
            sentiment,
            onchain,
        }
    }

    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, DataError> {
        let asset: Asset = symbol.parse()?;
        self.fundamentals.fundamentals(asset).await
    }

    /// Score recent news for the selected symbol.
    async fn score_news(
        &self,
        news: &NewsStage,
        symbol: &str,
    ) -> Result<SentimentDataset, StageError> {
        let asset: Asset = symbol.parse()?;
        let articles = news.source.articles(asset, news.limit).await?;

        let mut data = SentimentDataset::new();
        data.extend_scored(&self.analyzer, asset, &articles);

        if data.is_empty() {
            return Err(StageError::NoArticles);
        }
        Ok(data)
    }

    async fn fetch_onchain(&self, symbol: &str) -> Result<Vec<OnchainMetric>, DataError> {
        let asset: Asset = symbol.parse()?;
        self.onchain.metrics(asset).await
    }
}

async fn stage<T, E, F>(name: &'static str, work: F) -> StageOutcome<T>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    info!(stage = name, "Stage started");
    let started = Instant::now();

    match work.await {
        Ok(value) => {
            info!(
                stage = name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Stage finished"
            );
            StageOutcome::Ready(value)
        }
        Err(e) => {
            error!(stage = name, error = %e, "Stage failed");
            StageOutcome::Failed {
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use insight_core::traits::MarketDataSource;
    use insight_core::types::{Article, Bar, FetchWindow, Sample};
    use insight_signals::{IndicatorKind, Signal};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const HOUR_MS: i64 = 3_600_000;

    struct Prices(Vec<Sample>);

    #[async_trait]
    impl MarketDataSource for Prices {
        async fn fetch_samples(
            &self,
            _asset: Asset,
            _window: &FetchWindow,
        ) -> Result<Vec<Sample>, DataError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "prices"
        }
    }

    struct Snapshot {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FundamentalsSource for Snapshot {
        async fn fundamentals(&self, asset: Asset) -> Result<Fundamentals, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Fundamentals {
                market_cap_usd: Some(dec!(1000000)),
                ..Fundamentals::unavailable(asset)
            })
        }

        fn name(&self) -> &str {
            "snapshot"
        }
    }

    struct Headlines {
        by_asset: Vec<(Asset, &'static str)>,
        seen: Mutex<Vec<(Asset, usize)>>,
    }

    #[async_trait]
    impl NewsSource for Headlines {
        async fn articles(&self, asset: Asset, limit: usize) -> Result<Vec<Article>, DataError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push((asset, limit));
            }
            Ok(self
                .by_asset
                .iter()
                .filter(|(a, _)| *a == asset)
                .map(|(_, title)| Article {
                    title: title.to_string(),
                    description: String::new(),
                    published_at: Some(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()),
                })
                .collect())
        }

        fn name(&self) -> &str {
            "headlines"
        }
    }

    struct BrokenNews;

    #[async_trait]
    impl NewsSource for BrokenNews {
        async fn articles(&self, _asset: Asset, _limit: usize) -> Result<Vec<Article>, DataError> {
            Err(DataError::upstream("news", "connection refused"))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    struct NoChain;

    #[async_trait]
    impl OnchainSource for NoChain {
        async fn metrics(&self, _asset: Asset) -> Result<Vec<OnchainMetric>, DataError> {
            Err(DataError::Unavailable("On-chain metrics provider".into()))
        }

        fn name(&self) -> &str {
            "none"
        }
    }

    fn rising(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| {
                let c = 100.0 + i as f64;
                Bar::new(i as i64 * HOUR_MS, c, c + 1.0, c - 1.0, c, 10.0).into()
            })
            .collect()
    }

    fn session(samples: Vec<Sample>) -> (AnalysisSession, Arc<Snapshot>) {
        let snapshot = Arc::new(Snapshot {
            calls: AtomicUsize::new(0),
        });
        let engine = SignalEngine::new(Arc::new(Prices(samples)));
        let session = AnalysisSession::new(engine, snapshot.clone(), Arc::new(NoChain));
        (session, snapshot)
    }

    fn request(symbol: &str) -> SessionRequest {
        SessionRequest::new(symbol, [IndicatorKind::Rsi].into_iter().collect())
    }

    #[tokio::test]
    async fn test_all_stages_run() {
        let news = Arc::new(Headlines {
            by_asset: vec![
                (Asset::Btc, "Bitcoin rally continues"),
                (Asset::Eth, "Ethereum upgrade delayed"),
            ],
            seen: Mutex::new(vec![]),
        });
        let (session, _) = session(rising(60));
        let session = session.with_news(news.clone(), 5);

        let report = session.run(&request("BTC")).await;

        let technical = report.technical.ready().unwrap();
        assert_eq!(technical.signal, Signal::Sell(insight_signals::SignalReason::Overbought));
        assert!(report.fundamentals.is_ready());
        assert_eq!(report.sentiment.ready().unwrap().len(), 1);
        assert_eq!(
            report.onchain.error(),
            Some("On-chain metrics provider is not configured")
        );

        let seen = news.seen.lock().unwrap().clone();
        assert_eq!(seen, vec![(Asset::Btc, 5)]);
    }

    struct FailsFor(Asset);

    #[async_trait]
    impl NewsSource for FailsFor {
        async fn articles(&self, asset: Asset, _limit: usize) -> Result<Vec<Article>, DataError> {
            if asset == self.0 {
                return Err(DataError::upstream("news", "timeout"));
            }
            Ok(vec![Article {
                title: format!("{} gains momentum", asset),
                description: String::new(),
                published_at: None,
            }])
        }

        fn name(&self) -> &str {
            "fails-for"
        }
    }

    #[tokio::test]
    async fn test_sentiment_ignores_other_symbols() {
        let (session, _) = session_with(Arc::new(FailsFor(Asset::Xrp)));
        let report = session.run(&request("BTC")).await;

        let data = report.sentiment.ready().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.by_symbol().into_keys().collect::<Vec<_>>(), vec![Asset::Btc]);

        let (session, _) = session_with(Arc::new(FailsFor(Asset::Btc)));
        let report = session.run(&request("BTC")).await;
        assert!(report.sentiment.error().unwrap().contains("timeout"));
    }

    #[tokio::test]
    async fn test_failed_stage_is_isolated() {
        let (session, snapshot) = session(vec![]);
        let session = session.with_news(Arc::new(BrokenNews), 5);

        let report = session.run(&request("ETH")).await;

        assert_eq!(report.technical.error(), Some("No data received for ETH"));
        assert!(report.fundamentals.is_ready());
        assert_eq!(snapshot.calls.load(Ordering::SeqCst), 1);
        assert!(report.sentiment.error().unwrap().contains("connection refused"));
        assert!(report.onchain.error().is_some());
    }

    #[tokio::test]
    async fn test_empty_news_fails_sentiment() {
        let news = Arc::new(Headlines {
            by_asset: vec![],
            seen: Mutex::new(vec![]),
        });
        let (session, _) = session(rising(30));
        let report = session.with_news(news, 5).run(&request("XRP")).await;

        assert_eq!(report.sentiment.error(), Some("no news articles received"));
    }

    #[tokio::test]
    async fn test_sentiment_skipped() {
        let (session, _) = session(rising(30));
        let report = session.run(&request("BTC")).await;
        assert!(matches!(report.sentiment, StageOutcome::Skipped));

        let news = Arc::new(BrokenNews);
        let (session, _) = session_with(news);
        let report = session
            .run(&request("BTC").with_sentiment(false))
            .await;
        assert!(matches!(report.sentiment, StageOutcome::Skipped));
    }

    fn session_with(news: Arc<dyn NewsSource>) -> (AnalysisSession, Arc<Snapshot>) {
        let (session, snapshot) = session(rising(30));
        (session.with_news(news, 5), snapshot)
    }

    #[tokio::test]
    async fn test_unsupported_symbol_fails_symbol_stages() {
        let (session, snapshot) = session(rising(30));
        let report = session.run(&request("DOGE")).await;

        assert_eq!(report.technical.error(), Some("Unsupported symbol: DOGE"));
        assert_eq!(report.fundamentals.error(), Some("Unsupported symbol: DOGE"));
        assert_eq!(snapshot.calls.load(Ordering::SeqCst), 0);
    }
}
