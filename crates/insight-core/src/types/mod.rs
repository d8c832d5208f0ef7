//! Core data types.

mod asset;
mod fundamentals;
mod news;
mod ohlcv;
mod timeframe;
mod window;

pub use asset::Asset;
pub use fundamentals::{Fundamentals, MetricValue};
pub use news::{Article, OnchainMetric};
pub use ohlcv::{Bar, PriceSeries, Sample};
pub use timeframe::Timeframe;
pub use window::{AnalysisWindow, FetchWindow, DEFAULT_TRAILING_DAYS};
