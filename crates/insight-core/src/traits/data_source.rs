//! Collaborator trait definitions.

use crate::error::DataError;
use crate::types::{Article, Asset, FetchWindow, Fundamentals, OnchainMetric, Sample};
use async_trait::async_trait;

/// Trait for historical price sources.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch samples for an asset.
    ///
    /// # Arguments
    /// * `asset` - The asset to fetch; providers map it to their own ticker
    /// * `window` - Time window and bar interval
    ///
    /// # Returns
    /// Samples ordered from oldest to newest, possibly with missing fields,
    /// or an empty vector when the provider has nothing for the window.
    async fn fetch_samples(
        &self,
        asset: Asset,
        window: &FetchWindow,
    ) -> Result<Vec<Sample>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}

/// Trait for market fundamentals providers.
#[async_trait]
pub trait FundamentalsSource: Send + Sync {
    /// Fetch the current market snapshot for an asset.
    async fn fundamentals(&self, asset: Asset) -> Result<Fundamentals, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}

/// Trait for news providers.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch up to `limit` recent articles about an asset.
    ///
    /// A provider that answers with a non-success status yields an empty
    /// list; only transport failures are errors.
    async fn articles(&self, asset: Asset, limit: usize) -> Result<Vec<Article>, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}

/// Trait for on-chain metric providers.
#[async_trait]
pub trait OnchainSource: Send + Sync {
    /// Fetch on-chain metrics for an asset.
    async fn metrics(&self, asset: Asset) -> Result<Vec<OnchainMetric>, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
