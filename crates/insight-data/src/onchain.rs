//! On-chain metrics placeholder.

use async_trait::async_trait;
use insight_core::error::DataError;
use insight_core::traits::OnchainSource;
use insight_core::types::{Asset, OnchainMetric};
use tracing::debug;

/// Reports that no on-chain provider is configured.
///
/// The on-chain block of a session therefore always shows its isolated
/// error message.
#[derive(Debug, Default, Clone)]
pub struct UnconfiguredOnchainSource;

#[async_trait]
impl OnchainSource for UnconfiguredOnchainSource {
    async fn metrics(&self, asset: Asset) -> Result<Vec<OnchainMetric>, DataError> {
        debug!(%asset, "On-chain metrics requested without a provider");
        Err(DataError::Unavailable("On-chain metrics provider".to_string()))
    }

    fn name(&self) -> &str {
        "unconfigured"
    }
}
