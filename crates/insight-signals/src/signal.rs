//! Signal and trend labels.

use serde::{Serialize, Serializer};
use std::fmt;

/// What produced a directional reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalReason {
    Oversold,
    Overbought,
    MacdCrossover,
    Ichimoku,
}

impl SignalReason {
    fn label(&self) -> &'static str {
        match self {
            SignalReason::Oversold => "Oversold",
            SignalReason::Overbought => "Overbought",
            SignalReason::MacdCrossover => "MACD Crossover",
            SignalReason::Ichimoku => "Ichimoku",
        }
    }
}

/// Aggregate trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    #[default]
    Neutral,
    Buy(SignalReason),
    Sell(SignalReason),
    Bullish(SignalReason),
    Bearish(SignalReason),
    /// Neutral because the named indicator lacked data.
    Insufficient(SignalReason),
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Neutral => f.write_str("Neutral"),
            Signal::Buy(r) => write!(f, "Buy ({})", r.label()),
            Signal::Sell(r) => write!(f, "Sell ({})", r.label()),
            Signal::Bullish(r) => write!(f, "Bullish ({})", r.label()),
            Signal::Bearish(r) => write!(f, "Bearish ({})", r.label()),
            Signal::Insufficient(r) => write!(f, "Neutral ({}: insufficient data)", r.label()),
        }
    }
}

impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Long-term direction from the SMA 50 / SMA 200 relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    #[default]
    Neutral,
}

impl Trend {
    /// Compare the latest short and long averages.
    pub fn from_averages(short: Option<f64>, long: Option<f64>) -> Self {
        match (short, long) {
            (Some(s), Some(l)) if s > l => Trend::Uptrend,
            (Some(s), Some(l)) if s < l => Trend::Downtrend,
            _ => Trend::Neutral,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Uptrend => "Uptrend",
            Trend::Downtrend => "Downtrend",
            Trend::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_display() {
        assert_eq!(Signal::Neutral.to_string(), "Neutral");
        assert_eq!(Signal::Buy(SignalReason::Oversold).to_string(), "Buy (Oversold)");
        assert_eq!(Signal::Sell(SignalReason::Overbought).to_string(), "Sell (Overbought)");
        assert_eq!(
            Signal::Buy(SignalReason::MacdCrossover).to_string(),
            "Buy (MACD Crossover)"
        );
        assert_eq!(
            Signal::Bearish(SignalReason::Ichimoku).to_string(),
            "Bearish (Ichimoku)"
        );
        assert_eq!(
            Signal::Insufficient(SignalReason::Ichimoku).to_string(),
            "Neutral (Ichimoku: insufficient data)"
        );
    }

    #[test]
    fn test_signal_serializes_as_label() {
        let json = serde_json::to_string(&Signal::Sell(SignalReason::MacdCrossover)).unwrap();
        assert_eq!(json, "\"Sell (MACD Crossover)\"");
    }

    #[test]
    fn test_trend_from_averages() {
        assert_eq!(Trend::from_averages(Some(2.0), Some(1.0)), Trend::Uptrend);
        assert_eq!(Trend::from_averages(Some(1.0), Some(2.0)), Trend::Downtrend);
        assert_eq!(Trend::from_averages(Some(1.0), Some(1.0)), Trend::Neutral);
        assert_eq!(Trend::from_averages(Some(1.0), None), Trend::Neutral);
    }
}
