//! Data providers for the insight dashboard.
//!
//! - [`YahooChartSource`] and [`CsvDataSource`] supply price history
//! - [`CoinGeckoSource`] supplies market fundamentals
//! - [`NewsApiSource`] supplies recent articles for sentiment scoring
//! - [`UnconfiguredOnchainSource`] stands in for an on-chain provider

mod coingecko;
mod csv_source;
mod http;
mod newsapi;
mod onchain;
mod yahoo;

pub use coingecko::CoinGeckoSource;
pub use csv_source::CsvDataSource;
pub use newsapi::NewsApiSource;
pub use onchain::UnconfiguredOnchainSource;
pub use yahoo::YahooChartSource;
