//! Coarse market fundamentals for a coin.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Asset;

/// Market snapshot reported by a fundamentals provider.
///
/// Every metric is optional; providers omit fields they cannot report and
/// those are shown as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub asset: Asset,
    pub market_cap_usd: Option<Decimal>,
    pub volume_24h_usd: Option<Decimal>,
    pub price_change_24h_pct: Option<Decimal>,
    pub market_cap_rank: Option<u32>,
    pub circulating_supply: Option<Decimal>,
}

/// A displayable fundamentals value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Usd(Decimal),
    Percent(Decimal),
    Rank(u32),
    Amount(Decimal),
    NotAvailable,
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Usd(d) => write!(f, "${}", group_thousands(d.round_dp(2))),
            MetricValue::Percent(d) => write!(f, "{:.2}%", d),
            MetricValue::Rank(r) => write!(f, "#{}", r),
            MetricValue::Amount(d) => write!(f, "{}", group_thousands(d.round_dp(0))),
            MetricValue::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Fundamentals {
    /// Snapshot with every metric unavailable.
    pub fn unavailable(asset: Asset) -> Self {
        Self {
            asset,
            market_cap_usd: None,
            volume_24h_usd: None,
            price_change_24h_pct: None,
            market_cap_rank: None,
            circulating_supply: None,
        }
    }

    /// Labelled metrics in display order.
    pub fn metrics(&self) -> Vec<(&'static str, MetricValue)> {
        let or_na = |v: Option<Decimal>, f: fn(Decimal) -> MetricValue| {
            v.map_or(MetricValue::NotAvailable, f)
        };
        vec![
            ("Market Cap (USD)", or_na(self.market_cap_usd, MetricValue::Usd)),
            ("24h Volume (USD)", or_na(self.volume_24h_usd, MetricValue::Usd)),
            (
                "24h Price Change (%)",
                or_na(self.price_change_24h_pct, MetricValue::Percent),
            ),
            (
                "Market Cap Rank",
                self.market_cap_rank
                    .map_or(MetricValue::NotAvailable, MetricValue::Rank),
            ),
            (
                "Circulating Supply",
                or_na(self.circulating_supply, MetricValue::Amount),
            ),
        ]
    }
}

fn group_thousands(value: Decimal) -> String {
    let text = value.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
