//! Core traits.

mod data_source;
mod indicator;

pub use data_source::{FundamentalsSource, MarketDataSource, NewsSource, OnchainSource};
pub use indicator::{align, last_defined, Indicator, MultiOutputIndicator, RangeIndicator};
