//! Supported assets and their identifiers at each external provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// A cryptocurrency supported by the dashboard.
///
/// The mapping from symbol to provider identifiers is a static table; any
/// other symbol is rejected before a request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    Btc,
    Eth,
    Xrp,
}

impl Asset {
    /// Dashboard symbol (e.g. "BTC").
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
            Asset::Xrp => "XRP",
        }
    }

    /// Market-data ticker quoted in USD (e.g. "BTC-USD").
    pub fn market_ticker(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC-USD",
            Asset::Eth => "ETH-USD",
            Asset::Xrp => "XRP-USD",
        }
    }

    /// Coin identifier used by the fundamentals provider.
    pub fn coin_id(&self) -> &'static str {
        match self {
            Asset::Btc => "bitcoin",
            Asset::Eth => "ethereum",
            Asset::Xrp => "ripple",
        }
    }

    /// All supported assets, in selector order.
    pub fn all() -> &'static [Asset] {
        &[Asset::Btc, Asset::Eth, Asset::Xrp]
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Asset {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BTC" => Ok(Asset::Btc),
            "ETH" => Ok(Asset::Eth),
            "XRP" => Ok(Asset::Xrp),
            _ => Err(DataError::UnsupportedSymbol(s.to_string())),
        }
    }
}
