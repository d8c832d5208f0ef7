//! Yahoo Finance chart API.

use async_trait::async_trait;
use insight_core::error::DataError;
use insight_core::traits::MarketDataSource;
use insight_core::types::{Asset, FetchWindow, Sample, Timeframe};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::http::{build_client, ensure_success, trim_base};

const PROVIDER: &str = "Yahoo Finance";

/// Price history from the public chart endpoint (`/v8/finance/chart/{ticker}`).
pub struct YahooChartSource {
    base_url: String,
    client: Client,
}

impl YahooChartSource {
    pub const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com";

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        Ok(Self {
            base_url: trim_base(base_url),
            client: build_client(PROVIDER, timeout)?,
        })
    }

    fn interval(timeframe: Timeframe) -> &'static str {
        match timeframe {
            Timeframe::Hour1 => "1h",
            Timeframe::Daily => "1d",
        }
    }

    fn query(window: &FetchWindow) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("interval", Self::interval(window.timeframe()).to_string()),
            ("includePrePost", "false".to_string()),
        ];

        match window {
            FetchWindow::Trailing { days: 30, .. } => params.push(("range", "1mo".to_string())),
            FetchWindow::Trailing { days, .. } => params.push(("range", format!("{}d", days))),
            FetchWindow::Range { start, end, .. } => {
                params.push(("period1", start.timestamp().to_string()));
                params.push(("period2", end.timestamp().to_string()));
            }
        }

        params
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

impl ChartResult {
    fn into_samples(self) -> Vec<Sample> {
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();
        let field = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

        self.timestamp
            .iter()
            .enumerate()
            .map(|(i, &ts)| Sample {
                timestamp: ts * 1000,
                open: field(&quote.open, i),
                high: field(&quote.high, i),
                low: field(&quote.low, i),
                close: field(&quote.close, i),
                volume: field(&quote.volume, i),
            })
            .collect()
    }
}

#[async_trait]
impl MarketDataSource for YahooChartSource {
    async fn fetch_samples(
        &self,
        asset: Asset,
        window: &FetchWindow,
    ) -> Result<Vec<Sample>, DataError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, asset.market_ticker());
        let params = Self::query(window);
        debug!(%url, ?params, "Requesting price history");

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DataError::upstream(PROVIDER, e))?;
        let resp = ensure_success(PROVIDER, resp)?;

        let data: ChartResponse = resp
            .json()
            .await
            .map_err(|e| DataError::upstream(PROVIDER, e))?;

        if let Some(err) = data.chart.error {
            return Err(DataError::upstream(
                PROVIDER,
                format!("{}: {}", err.code, err.description.unwrap_or_default()),
            ));
        }

        Ok(data
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .map(ChartResult::into_samples)
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockito::Matcher;

    const BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "BTC-USD"},
                "timestamp": [1717200000, 1717203600, 1717207200],
                "indicators": {"quote": [{
                    "open":   [67000.0, 67100.0, null],
                    "high":   [67200.0, 67300.0, null],
                    "low":    [66900.0, 67000.0, null],
                    "close":  [67100.0, 67250.0, null],
                    "volume": [1200, 900, null]
                }]}
            }],
            "error": null
        }
    }"#;

    fn source(url: String) -> YahooChartSource {
        YahooChartSource::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_trailing_month() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v8/finance/chart/BTC-USD")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("interval".into(), "1h".into()),
                Matcher::UrlEncoded("range".into(), "1mo".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let window = FetchWindow::Trailing {
            days: 30,
            timeframe: Timeframe::Hour1,
        };
        let samples = source(server.url())
            .fetch_samples(Asset::Btc, &window)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].timestamp, 1_717_200_000_000);
        assert_eq!(samples[1].close, Some(67250.0));
        assert!(samples[2].complete().is_none());
    }

    #[tokio::test]
    async fn test_fetch_explicit_range() {
        let mut server = mockito::Server::new_async().await;
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let _mock = server
            .mock("GET", "/v8/finance/chart/ETH-USD")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("interval".into(), "1d".into()),
                Matcher::UrlEncoded("period1".into(), start.timestamp().to_string()),
                Matcher::UrlEncoded("period2".into(), end.timestamp().to_string()),
            ]))
            .with_status(200)
            .with_body(BODY)
            .create_async()
            .await;

        let window = FetchWindow::Range {
            start,
            end,
            timeframe: Timeframe::Daily,
        };
        let samples = source(server.url())
            .fetch_samples(Asset::Eth, &window)
            .await
            .unwrap();

        assert_eq!(samples.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_result() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v8/finance/chart/XRP-USD")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"chart": {"result": [{"indicators": {"quote": [{}]}}], "error": null}}"#)
            .create_async()
            .await;

        let samples = source(server.url())
            .fetch_samples(
                Asset::Xrp,
                &FetchWindow::Trailing {
                    days: 30,
                    timeframe: Timeframe::Hour1,
                },
            )
            .await
            .unwrap();

        assert!(samples.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_is_upstream() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v8/finance/chart/BTC-USD")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found"}}}"#)
            .create_async()
            .await;

        let err = source(server.url())
            .fetch_samples(
                Asset::Btc,
                &FetchWindow::Trailing {
                    days: 30,
                    timeframe: Timeframe::Hour1,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::Status { status: 404, .. }));
    }
}
