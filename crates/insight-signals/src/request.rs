//! Indicator vocabulary and requests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// An indicator the engine knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndicatorKind {
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "MACD")]
    Macd,
    #[serde(rename = "SMA 50")]
    Sma50,
    #[serde(rename = "SMA 200")]
    Sma200,
    #[serde(rename = "Bollinger Bands")]
    BollingerBands,
    #[serde(rename = "Ichimoku")]
    Ichimoku,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 6] = [
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::Sma50,
        IndicatorKind::Sma200,
        IndicatorKind::BollingerBands,
        IndicatorKind::Ichimoku,
    ];

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::Sma50 => "SMA 50",
            IndicatorKind::Sma200 => "SMA 200",
            IndicatorKind::BollingerBands => "Bollinger Bands",
            IndicatorKind::Ichimoku => "Ichimoku",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndicatorKind {
    type Err = String;

    /// Accepts display names regardless of case and separators
    /// ("SMA 50", "sma-50", "SMA50", "bollinger").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "rsi" => Ok(IndicatorKind::Rsi),
            "macd" => Ok(IndicatorKind::Macd),
            "sma50" => Ok(IndicatorKind::Sma50),
            "sma200" => Ok(IndicatorKind::Sma200),
            "bollinger" | "bollingerbands" | "bb" => Ok(IndicatorKind::BollingerBands),
            "ichimoku" => Ok(IndicatorKind::Ichimoku),
            _ => Err(format!("Unknown indicator: {}", s.trim())),
        }
    }
}

/// Set of indicators requested for one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorRequest {
    kinds: BTreeSet<IndicatorKind>,
}

impl IndicatorRequest {
    /// Empty request: price only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known indicator.
    pub fn all() -> Self {
        IndicatorKind::ALL.into_iter().collect()
    }

    /// Parse free-form indicator names.
    ///
    /// Unknown names are logged and returned separately; they never affect
    /// the analysis.
    pub fn parse<I, S>(names: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut request = Self::new();
        let mut ignored = Vec::new();

        for name in names {
            let name = name.as_ref();
            if name.trim().is_empty() {
                continue;
            }
            match name.parse::<IndicatorKind>() {
                Ok(kind) => request.insert(kind),
                Err(_) => {
                    warn!(indicator = %name, "Ignoring unknown indicator");
                    ignored.push(name.to_string());
                }
            }
        }

        (request, ignored)
    }

    pub fn insert(&mut self, kind: IndicatorKind) {
        self.kinds.insert(kind);
    }

    /// Add or remove an indicator, returning whether it is now requested.
    pub fn toggle(&mut self, kind: IndicatorKind) -> bool {
        if !self.kinds.remove(&kind) {
            self.kinds.insert(kind);
            return true;
        }
        false
    }

    pub fn contains(&self, kind: IndicatorKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = IndicatorKind> + '_ {
        self.kinds.iter().copied()
    }
}

impl FromIterator<IndicatorKind> for IndicatorRequest {
    fn from_iter<T: IntoIterator<Item = IndicatorKind>>(iter: T) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for IndicatorRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|k| k.name()).collect();
        f.write_str(&names.join(", "))
    }
}
