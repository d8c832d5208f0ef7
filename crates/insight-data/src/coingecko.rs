//! CoinGecko fundamentals.

use async_trait::async_trait;
use insight_core::error::DataError;
use insight_core::traits::FundamentalsSource;
use insight_core::types::{Asset, Fundamentals};
use num_traits::FromPrimitive;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::http::{build_client, ensure_success, trim_base};

const PROVIDER: &str = "CoinGecko";

/// Market snapshot from `/api/v3/coins/{id}`.
pub struct CoinGeckoSource {
    base_url: String,
    client: Client,
}

impl CoinGeckoSource {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.coingecko.com";

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        Ok(Self {
            base_url: trim_base(base_url),
            client: build_client(PROVIDER, timeout)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CoinResponse {
    market_cap_rank: Option<u32>,
    #[serde(default)]
    market_data: MarketData,
}

#[derive(Debug, Default, Deserialize)]
struct MarketData {
    #[serde(default)]
    market_cap: UsdValue,
    #[serde(default)]
    total_volume: UsdValue,
    price_change_percentage_24h: Option<f64>,
    circulating_supply: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct UsdValue {
    usd: Option<f64>,
}

fn decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64)
}

impl CoinResponse {
    fn into_fundamentals(self, asset: Asset) -> Fundamentals {
        let market = self.market_data;
        Fundamentals {
            asset,
            market_cap_usd: decimal(market.market_cap.usd),
            volume_24h_usd: decimal(market.total_volume.usd),
            price_change_24h_pct: decimal(market.price_change_percentage_24h),
            market_cap_rank: self.market_cap_rank,
            circulating_supply: decimal(market.circulating_supply),
        }
    }
}

#[async_trait]
impl FundamentalsSource for CoinGeckoSource {
    async fn fundamentals(&self, asset: Asset) -> Result<Fundamentals, DataError> {
        let url = format!("{}/api/v3/coins/{}", self.base_url, asset.coin_id());
        let params = [
            ("localization", "false"),
            ("tickers", "false"),
            ("community_data", "false"),
            ("developer_data", "false"),
        ];
        debug!(%url, "Requesting fundamentals");

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DataError::upstream(PROVIDER, e))?;
        let resp = ensure_success(PROVIDER, resp)?;

        let data: CoinResponse = resp
            .json()
            .await
            .map_err(|e| DataError::upstream(PROVIDER, e))?;

        Ok(data.into_fundamentals(asset))
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::types::MetricValue;
    use mockito::Matcher;
    use rust_decimal_macros::dec;

    async fn serve(path: &str, status: usize, body: String) -> (mockito::ServerGuard, mockito::Mock) {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;
        (server, mock)
    }

    #[tokio::test]
    async fn test_full_snapshot() {
        let body = serde_json::json!({
            "id": "bitcoin",
            "market_cap_rank": 1,
            "market_data": {
                "market_cap": {"usd": 1_300_000_000_000.0_f64, "eur": 1.0},
                "total_volume": {"usd": 25_000_000_000.5_f64},
                "price_change_percentage_24h": -1.25,
                "circulating_supply": 19_700_000.0
            }
        });
        let (server, mock) = serve("/api/v3/coins/bitcoin", 200, body.to_string()).await;

        let source = CoinGeckoSource::new(server.url(), Duration::from_secs(5)).unwrap();
        let snapshot = source.fundamentals(Asset::Btc).await.unwrap();

        mock.assert_async().await;
        assert_eq!(snapshot.market_cap_rank, Some(1));
        assert_eq!(snapshot.market_cap_usd, Some(dec!(1300000000000)));
        assert_eq!(snapshot.price_change_24h_pct, Some(dec!(-1.25)));
        assert_eq!(snapshot.circulating_supply, Some(dec!(19700000)));
    }

    #[tokio::test]
    async fn test_missing_fields_are_not_available() {
        let body = serde_json::json!({"id": "ripple", "market_data": {"market_cap": {}}});
        let (server, _mock) = serve("/api/v3/coins/ripple", 200, body.to_string()).await;

        let source = CoinGeckoSource::new(server.url(), Duration::from_secs(5)).unwrap();
        let snapshot = source.fundamentals(Asset::Xrp).await.unwrap();

        assert_eq!(snapshot, Fundamentals::unavailable(Asset::Xrp));
        assert!(snapshot
            .metrics()
            .iter()
            .all(|(_, value)| *value == MetricValue::NotAvailable));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let (server, _mock) = serve("/api/v3/coins/ethereum", 429, "{}".to_string()).await;

        let source = CoinGeckoSource::new(server.url(), Duration::from_secs(5)).unwrap();
        let err = source.fundamentals(Asset::Eth).await.unwrap_err();

        assert!(matches!(err, DataError::Status { status: 429, .. }));
    }
}
