//! OHLCV (Open, High, Low, Close, Volume) data types.

use serde::{Deserialize, Serialize};

use super::Timeframe;
use crate::error::DataError;

/// A raw sample as delivered by a market-data provider.
///
/// Providers report gaps as missing fields; such samples never reach
/// indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl Sample {
    /// Convert into a bar if every OHLC field is present and finite.
    pub fn complete(&self) -> Option<Bar> {
        let field = |v: Option<f64>| v.filter(|x| x.is_finite());
        Some(Bar::new(
            self.timestamp,
            field(self.open)?,
            field(self.high)?,
            field(self.low)?,
            field(self.close)?,
            field(self.volume).unwrap_or(0.0),
        ))
    }
}

impl From<Bar> for Sample {
    fn from(bar: Bar) -> Self {
        Self {
            timestamp: bar.timestamp,
            open: Some(bar.open),
            high: Some(bar.high),
            low: Some(bar.low),
            close: Some(bar.close),
            volume: Some(bar.volume),
        }
    }
}

/// Compact OHLCV bar. Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// A cleaned, chronologically ordered, non-empty series of bars.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSeries {
    /// Symbol identifier
    pub symbol: String,
    /// Interval between bars
    pub timeframe: Timeframe,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series from raw provider samples.
    ///
    /// Incomplete samples are dropped, the rest are sorted by timestamp and
    /// duplicate timestamps keep the most recent sample. Fails with
    /// [`DataError::NoData`] when nothing survives.
    pub fn from_samples(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        samples: impl IntoIterator<Item = Sample>,
    ) -> Result<Self, DataError> {
        let bars = samples.into_iter().filter_map(|s| s.complete()).collect();
        Self::new(symbol, timeframe, bars)
    }

    /// Build a series from complete bars.
    pub fn new(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        mut bars: Vec<Bar>,
    ) -> Result<Self, DataError> {
        let symbol = symbol.into();
        bars.sort_by_key(|b| b.timestamp);

        let mut cleaned: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match cleaned.last_mut() {
                Some(prev) if prev.timestamp == bar.timestamp => *prev = bar,
                _ => cleaned.push(bar),
            }
        }

        if cleaned.is_empty() {
            return Err(DataError::NoData(symbol));
        }

        Ok(Self {
            symbol,
            timeframe,
            bars: cleaned,
        })
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the most recent bar.
    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    /// Most recent close price.
    pub fn last_close(&self) -> f64 {
        self.last().close
    }

    /// Extract timestamps (Unix milliseconds).
    pub fn timestamps(&self) -> Vec<i64> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }
}
