//! News articles and on-chain metrics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A news article about a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Text fed to the sentiment scorer: title and description.
    pub fn text(&self) -> String {
        format!("{}. {}", self.title, self.description)
    }

    /// Publication date, if known.
    pub fn date(&self) -> Option<NaiveDate> {
        self.published_at.map(|dt| dt.date_naive())
    }
}

/// A single on-chain measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnchainMetric {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_article_text_and_date() {
        let article = Article {
            title: "Bitcoin rallies".into(),
            description: "Strong inflows".into(),
            published_at: Some(Utc.with_ymd_and_hms(2025, 1, 2, 23, 59, 0).unwrap()),
        };
        assert_eq!(article.text(), "Bitcoin rallies. Strong inflows");
        assert_eq!(article.date(), NaiveDate::from_ymd_opt(2025, 1, 2));
    }
}
