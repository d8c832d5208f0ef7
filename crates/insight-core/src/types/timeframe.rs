//! Sampling intervals for price series.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bar interval of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1 hour bars
    #[serde(rename = "1h")]
    #[default]
    Hour1,
    /// Daily bars
    #[serde(rename = "1d")]
    Daily,
}

impl Timeframe {
    /// How far back market-data providers serve bars of this interval.
    pub fn max_history(&self) -> Option<Duration> {
        match self {
            Timeframe::Hour1 => Some(Duration::days(730)),
            Timeframe::Daily => None,
        }
    }

    /// Hourly bars while the provider still serves them for `span`, daily bars beyond.
    pub fn for_span(span: Duration) -> Timeframe {
        match Timeframe::Hour1.max_history() {
            Some(max) if span > max => Timeframe::Daily,
            _ => Timeframe::Hour1,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::Hour1 => "1h",
            Timeframe::Daily => "1d",
        };
        write!(f, "{}", s)
    }
}
