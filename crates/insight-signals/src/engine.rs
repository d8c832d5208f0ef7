//! The signal engine.

use chrono::Utc;
use insight_core::error::{DataError, IndicatorError};
use insight_core::traits::{last_defined, MarketDataSource};
use insight_core::types::{AnalysisWindow, Asset, PriceSeries, Timeframe};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::evaluator::{
    IchimokuEvaluator, IndicatorValues, MacdEvaluator, RsiEvaluator, SignalEvaluator,
};
use crate::figure::{Figure, LineSeries, LineStyle, Panel, Rgb};
use crate::request::IndicatorRequest;
use crate::signal::{Signal, Trend};

/// Tunable thresholds for signal evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// RSI lookback period
    pub rsi_period: usize,
    /// RSI above this reads as Sell (Overbought)
    pub overbought: f64,
    /// RSI below this reads as Buy (Oversold)
    pub oversold: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl SignalConfig {
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.rsi_period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "RSI period must be at least 2".into(),
            ));
        }
        if self.overbought <= self.oversold {
            return Err(IndicatorError::InvalidParameter(
                "Overbought must be greater than oversold".into(),
            ));
        }
        if self.overbought > 100.0 || self.oversold < 0.0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI thresholds must be between 0 and 100".into(),
            ));
        }
        Ok(())
    }
}

/// Result of one technical analysis.
#[derive(Debug, Clone, Serialize)]
pub struct TechnicalAnalysis {
    pub asset: Asset,
    pub signal: Signal,
    pub trend: Trend,
    pub last_price: f64,
    pub timeframe: Timeframe,
    pub bars: usize,
    #[serde(skip)]
    pub figure: Figure,
}

/// Computes requested indicators over a price series and derives the
/// aggregate signal, the trend and a chart.
pub struct SignalEngine {
    source: Arc<dyn MarketDataSource>,
    config: SignalConfig,
    evaluators: Vec<Box<dyn SignalEvaluator>>,
}

impl SignalEngine {
    /// Create an engine with default thresholds.
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self::with_config(source, SignalConfig::default())
    }

    pub fn with_config(source: Arc<dyn MarketDataSource>, config: SignalConfig) -> Self {
        // Evaluation order: later readings replace earlier ones.
        let evaluators: Vec<Box<dyn SignalEvaluator>> = vec![
            Box::new(RsiEvaluator::new(config.overbought, config.oversold)),
            Box::new(MacdEvaluator),
            Box::new(IchimokuEvaluator::default()),
        ];

        Self {
            source,
            config,
            evaluators,
        }
    }

    /// Fetch the series for `symbol` and evaluate the request.
    ///
    /// The symbol and the date bounds are checked before any provider call,
    /// so an unsupported symbol or an unusable range never reaches the network.
    pub async fn analyze(
        &self,
        symbol: &str,
        request: &IndicatorRequest,
        window: AnalysisWindow,
    ) -> Result<TechnicalAnalysis, DataError> {
        let asset: Asset = symbol.parse()?;
        let now = Utc::now();
        window.validate(now.date_naive())?;
        let fetch = window.resolve(now);

        info!(
            %asset,
            indicators = %request,
            source = self.source.name(),
            "Running technical analysis"
        );

        let samples = self.source.fetch_samples(asset, &fetch).await?;
        debug!(%asset, samples = samples.len(), "Received samples");

        let series = PriceSeries::from_samples(asset.symbol(), fetch.timeframe(), samples)?;
        Ok(self.evaluate(asset, &series, request))
    }

    /// Evaluate a request against an already cleaned series.
    pub fn evaluate(
        &self,
        asset: Asset,
        series: &PriceSeries,
        request: &IndicatorRequest,
    ) -> TechnicalAnalysis {
        let values = IndicatorValues::compute(series, request, &self.config);

        let signal = self
            .evaluators
            .iter()
            .filter(|e| request.contains(e.indicator()))
            .filter_map(|e| e.evaluate(&values))
            .last()
            .unwrap_or_default();

        let trend = match (&values.sma_50, &values.sma_200) {
            (Some(short), Some(long)) => Trend::from_averages(last_defined(short), last_defined(long)),
            _ => Trend::Neutral,
        };

        let figure = self.build_figure(asset, series, values);

        debug!(%asset, %signal, %trend, bars = series.len(), "Evaluated indicators");

        TechnicalAnalysis {
            asset,
            signal,
            trend,
            last_price: series.last_close(),
            timeframe: series.timeframe,
            bars: series.len(),
            figure,
        }
    }

    fn build_figure(&self, asset: Asset, series: &PriceSeries, values: IndicatorValues) -> Figure {
        let mut price = Panel::new(format!("Technical Analysis for {}", asset), "Price (USD)");
        price.push(LineSeries::new("Closing Price", Rgb::BLACK, values.closes));

        if let Some(sma) = values.sma_50 {
            price.push(LineSeries::new("SMA 50", Rgb::BLUE, sma).styled(LineStyle::Dashed));
        }
        if let Some(sma) = values.sma_200 {
            price.push(LineSeries::new("SMA 200", Rgb::RED, sma).styled(LineStyle::Dashed));
        }
        if let Some(bands) = values.bollinger {
            price.push(LineSeries::new("BB Upper", Rgb::GREEN, bands.upper));
            price.push(LineSeries::new("BB Lower", Rgb::RED, bands.lower));
        }
        if let Some(cloud) = values.ichimoku {
            price.push(LineSeries::new("Tenkan-sen", Rgb::ORANGE, cloud.tenkan).styled(LineStyle::DashDot));
            price.push(LineSeries::new("Kijun-sen", Rgb::BLUE, cloud.kijun).styled(LineStyle::DashDot));
            price.push(LineSeries::new("Senkou Span A", Rgb::GREEN, cloud.span_a));
            price.push(LineSeries::new("Senkou Span B", Rgb::RED, cloud.span_b));
        }

        let mut panels = vec![price];

        if let Some(rsi) = values.rsi {
            let mut panel = Panel::new("Relative Strength Index (RSI)", "RSI");
            panel.push(LineSeries::new("RSI", Rgb::BLUE, rsi));
            panel.guide(self.config.overbought, Rgb::RED);
            panel.guide(self.config.oversold, Rgb::GREEN);
            panels.push(panel);
        }
        if let Some(macd) = values.macd {
            let mut panel = Panel::new("Moving Average Convergence Divergence (MACD)", "MACD");
            panel.push(LineSeries::new("MACD", Rgb::PURPLE, macd.macd));
            panel.push(LineSeries::new("Signal Line", Rgb::ORANGE, macd.signal));
            panels.push(panel);
        }

        Figure {
            title: format!("Technical Analysis for {}", asset),
            timestamps: series.timestamps(),
            panels,
        }
    }
}
