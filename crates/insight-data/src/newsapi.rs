//! NewsAPI articles.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use insight_core::error::DataError;
use insight_core::traits::NewsSource;
use insight_core::types::{Article, Asset};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::http::{build_client, trim_base};

const PROVIDER: &str = "NewsAPI";

/// Recent English-language articles from `/v2/everything`, newest first.
pub struct NewsApiSource {
    base_url: String,
    api_key: String,
    language: String,
    client: Client,
}

impl NewsApiSource {
    pub const DEFAULT_BASE_URL: &'static str = "https://newsapi.org";

    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DataError> {
        Ok(Self {
            base_url: trim_base(base_url),
            api_key: api_key.into(),
            language: "en".to_string(),
            client: build_client(PROVIDER, timeout)?,
        })
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Article {
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            published_at: raw
                .published_at
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    async fn articles(&self, asset: Asset, limit: usize) -> Result<Vec<Article>, DataError> {
        let url = format!("{}/v2/everything", self.base_url);
        let params = [
            ("q", asset.symbol().to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("language", self.language.clone()),
            ("pageSize", limit.to_string()),
        ];
        debug!(%url, %asset, limit, "Requesting news");

        let resp = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| DataError::upstream(PROVIDER, e))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%asset, status = status.as_u16(), "News request rejected, skipping symbol");
            return Ok(vec![]);
        }

        let data: EverythingResponse = resp
            .json()
            .await
            .map_err(|e| DataError::upstream(PROVIDER, e))?;

        let articles: Vec<Article> = data
            .articles
            .into_iter()
            .take(limit)
            .map(Article::from)
            .collect();
        debug!(%asset, count = articles.len(), "Received articles");

        Ok(articles)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mockito::Matcher;

    fn source(url: String) -> NewsApiSource {
        NewsApiSource::new(url, "test-key", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_articles() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"name": "Example"},
                    "title": "Bitcoin hits record high",
                    "description": "Investors cheer as inflows surge",
                    "publishedAt": "2025-03-04T12:30:00Z"
                },
                {
                    "title": "Exchange outage",
                    "description": null,
                    "publishedAt": "not a date"
                }
            ]
        });
        let mock = server
            .mock("GET", "/v2/everything")
            .match_header("x-api-key", "test-key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "BTC".into()),
                Matcher::UrlEncoded("sortBy".into(), "publishedAt".into()),
                Matcher::UrlEncoded("language".into(), "en".into()),
                Matcher::UrlEncoded("pageSize".into(), "5".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let articles = source(server.url()).articles(Asset::Btc, 5).await.unwrap();

        mock.assert_async().await;
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].date(), NaiveDate::from_ymd_opt(2025, 3, 4));
        assert_eq!(articles[1].text(), "Exchange outage. ");
        assert!(articles[1].published_at.is_none());
    }

    #[tokio::test]
    async fn test_rejected_request_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/everything")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"status": "error", "code": "apiKeyInvalid"}"#)
            .create_async()
            .await;

        let articles = source(server.url()).articles(Asset::Eth, 5).await.unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_is_upstream_error() {
        // Nothing listens on the discard port
        let err = source("http://127.0.0.1:9".to_string())
            .articles(Asset::Xrp, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Upstream { .. }));
    }
}
