//! Signal evaluators.
//!
//! Each evaluator inspects one computed indicator and may produce a reading.
//! The engine runs them in a fixed order and keeps the last reading.

use insight_core::traits::{align, last_defined, Indicator, RangeIndicator};
use insight_core::types::PriceSeries;
use insight_indicators::{
    BandLines, BollingerBands, Ichimoku, IchimokuLines, Macd, MacdLines, Rsi, Sma,
};

use crate::engine::SignalConfig;
use crate::request::{IndicatorKind, IndicatorRequest};
use crate::signal::{Signal, SignalReason};

/// Indicator series computed for one request, aligned to the price series.
///
/// A field is `None` when the indicator was not requested.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    pub bars: usize,
    pub closes: Vec<Option<f64>>,
    pub rsi: Option<Vec<Option<f64>>>,
    pub macd: Option<MacdLines>,
    pub sma_50: Option<Vec<Option<f64>>>,
    pub sma_200: Option<Vec<Option<f64>>>,
    pub bollinger: Option<BandLines>,
    pub ichimoku: Option<IchimokuLines>,
}

impl IndicatorValues {
    /// Compute every requested indicator over the series.
    pub fn compute(series: &PriceSeries, request: &IndicatorRequest, config: &SignalConfig) -> Self {
        let closes = series.closes();
        let len = closes.len();
        let wants = |kind| request.contains(kind);

        let sma = |period: usize| align(len, &Sma::new(period).calculate(&closes));

        Self {
            bars: len,
            closes: closes.iter().copied().map(Some).collect(),
            rsi: wants(IndicatorKind::Rsi)
                .then(|| align(len, &Rsi::new(config.rsi_period).calculate(&closes))),
            macd: wants(IndicatorKind::Macd).then(|| Macd::new().lines(&closes)),
            sma_50: wants(IndicatorKind::Sma50).then(|| sma(50)),
            sma_200: wants(IndicatorKind::Sma200).then(|| sma(200)),
            bollinger: wants(IndicatorKind::BollingerBands)
                .then(|| BollingerBands::new().bands(&closes)),
            ichimoku: wants(IndicatorKind::Ichimoku)
                .then(|| Ichimoku::new().calculate_range(&series.highs(), &series.lows())),
        }
    }
}

/// A rule turning one indicator into an optional signal reading.
pub trait SignalEvaluator: Send + Sync {
    /// Indicator that must be requested for this evaluator to run.
    fn indicator(&self) -> IndicatorKind;

    /// Reading for the latest bar, or `None` to leave the signal unchanged.
    fn evaluate(&self, values: &IndicatorValues) -> Option<Signal>;
}

/// Overbought/oversold thresholds on the last RSI value.
#[derive(Debug, Clone)]
pub struct RsiEvaluator {
    overbought: f64,
    oversold: f64,
}

impl RsiEvaluator {
    pub fn new(overbought: f64, oversold: f64) -> Self {
        Self {
            overbought,
            oversold,
        }
    }
}

impl SignalEvaluator for RsiEvaluator {
    fn indicator(&self) -> IndicatorKind {
        IndicatorKind::Rsi
    }

    fn evaluate(&self, values: &IndicatorValues) -> Option<Signal> {
        let rsi = last_defined(values.rsi.as_ref()?)?;
        if rsi > self.overbought {
            Some(Signal::Sell(SignalReason::Overbought))
        } else if rsi < self.oversold {
            Some(Signal::Buy(SignalReason::Oversold))
        } else {
            None
        }
    }
}

/// MACD line against its signal line.
#[derive(Debug, Clone, Default)]
pub struct MacdEvaluator;

impl SignalEvaluator for MacdEvaluator {
    fn indicator(&self) -> IndicatorKind {
        IndicatorKind::Macd
    }

    fn evaluate(&self, values: &IndicatorValues) -> Option<Signal> {
        let lines = values.macd.as_ref()?;
        let macd = last_defined(&lines.macd)?;
        let signal = last_defined(&lines.signal)?;

        if macd > signal {
            Some(Signal::Buy(SignalReason::MacdCrossover))
        } else {
            Some(Signal::Sell(SignalReason::MacdCrossover))
        }
    }
}

/// Tenkan-sen against Kijun-sen.
#[derive(Debug, Clone)]
pub struct IchimokuEvaluator {
    min_bars: usize,
}

impl Default for IchimokuEvaluator {
    fn default() -> Self {
        Self {
            min_bars: Ichimoku::new().period(),
        }
    }
}

impl SignalEvaluator for IchimokuEvaluator {
    fn indicator(&self) -> IndicatorKind {
        IndicatorKind::Ichimoku
    }

    fn evaluate(&self, values: &IndicatorValues) -> Option<Signal> {
        let lines = values.ichimoku.as_ref()?;
        if values.bars < self.min_bars {
            return Some(Signal::Insufficient(SignalReason::Ichimoku));
        }

        match lines.last_conversion() {
            Some((tenkan, kijun)) if tenkan > kijun => Some(Signal::Bullish(SignalReason::Ichimoku)),
            Some(_) => Some(Signal::Bearish(SignalReason::Ichimoku)),
            None => Some(Signal::Insufficient(SignalReason::Ichimoku)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_rsi(last: f64) -> IndicatorValues {
        IndicatorValues {
            rsi: Some(vec![None, Some(50.0), Some(last)]),
            ..Default::default()
        }
    }

    #[test]
    fn test_rsi_thresholds() {
        let evaluator = RsiEvaluator::new(70.0, 30.0);

        assert_eq!(
            evaluator.evaluate(&with_rsi(75.0)),
            Some(Signal::Sell(SignalReason::Overbought))
        );
        assert_eq!(
            evaluator.evaluate(&with_rsi(25.0)),
            Some(Signal::Buy(SignalReason::Oversold))
        );
        assert_eq!(evaluator.evaluate(&with_rsi(70.0)), None);
        assert_eq!(evaluator.evaluate(&IndicatorValues::default()), None);
    }

    #[test]
    fn test_macd_needs_both_lines() {
        let mut values = IndicatorValues {
            macd: Some(MacdLines {
                macd: vec![Some(1.0), Some(2.0)],
                signal: vec![None, None],
            }),
            ..Default::default()
        };
        assert_eq!(MacdEvaluator.evaluate(&values), None);

        values.macd = Some(MacdLines {
            macd: vec![Some(1.0), Some(2.0)],
            signal: vec![None, Some(2.0)],
        });
        // Equal lines read as Sell
        assert_eq!(
            MacdEvaluator.evaluate(&values),
            Some(Signal::Sell(SignalReason::MacdCrossover))
        );
    }

    #[test]
    fn test_ichimoku_short_series() {
        let values = IndicatorValues {
            bars: 30,
            ichimoku: Some(IchimokuLines {
                tenkan: vec![Some(2.0)],
                kijun: vec![Some(1.0)],
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(
            IchimokuEvaluator::default().evaluate(&values),
            Some(Signal::Insufficient(SignalReason::Ichimoku))
        );
    }
}
