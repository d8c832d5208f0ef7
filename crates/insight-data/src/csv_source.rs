//! CSV data source.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use csv::ReaderBuilder;
use insight_core::error::DataError;
use insight_core::traits::MarketDataSource;
use insight_core::types::{Asset, FetchWindow, Sample};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV record format.
///
/// Price columns may be empty; such rows become incomplete samples and are
/// dropped when the series is cleaned.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "Datetime", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open")]
    open: Option<f64>,
    #[serde(alias = "High")]
    high: Option<f64>,
    #[serde(alias = "Low")]
    low: Option<f64>,
    #[serde(alias = "Close", alias = "Adj Close")]
    close: Option<f64>,
    #[serde(alias = "Volume", default)]
    volume: Option<f64>,
}

/// Historical price data from a local CSV file, for offline analysis.
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoData(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Read every row of the file, oldest first.
    pub fn load_samples(&self) -> Result<Vec<Sample>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut samples = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            samples.push(Sample {
                timestamp: parse_timestamp(&record.date)?,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close,
                volume: record.volume,
            });
        }

        samples.sort_by_key(|s| s.timestamp);
        Ok(samples)
    }
}

#[async_trait]
impl MarketDataSource for CsvDataSource {
    /// Rows inside the window. A trailing window counts back from the newest
    /// row in the file rather than from the current time.
    async fn fetch_samples(
        &self,
        asset: Asset,
        window: &FetchWindow,
    ) -> Result<Vec<Sample>, DataError> {
        let samples = self.load_samples()?;
        debug!(%asset, path = %self.path.display(), rows = samples.len(), "Loaded CSV");

        let anchor = match window {
            FetchWindow::Trailing { .. } => samples
                .last()
                .and_then(|s| DateTime::<Utc>::from_timestamp_millis(s.timestamp))
                .unwrap_or_else(Utc::now),
            FetchWindow::Range { .. } => Utc::now(),
        };

        Ok(samples
            .into_iter()
            .filter(|s| window.contains(s.timestamp, anchor))
            .collect())
    }

    fn name(&self) -> &str {
        "CSV"
    }
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    // Unix timestamp; assume milliseconds past 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        return Ok(if ts > 10_000_000_000 { ts } else { ts * 1000 });
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::types::{PriceSeries, Timeframe};
    use std::io::Write;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("2024-01-15").unwrap(), 1_705_276_800_000);
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert!(parse_timestamp("2024-01-15T10:30:00Z").is_ok());
        assert_eq!(parse_timestamp("1705312800000").unwrap(), 1_705_312_800_000); // Unix ms
        assert_eq!(parse_timestamp("1705312800").unwrap(), 1_705_312_800_000); // Unix sec
        assert!(parse_timestamp("yesterday").is_err());
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_gaps() {
        let file = write_csv(
            "Date,Open,High,Low,Close,Volume\n\
             2024-06-02,2,3,1,2.5,10\n\
             2024-06-01,1,2,0.5,1.5,10\n\
             2024-06-03,,,,,\n",
        );
        let samples = CsvDataSource::new(file.path()).unwrap().load_samples().unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].close, Some(1.5));
        assert!(samples[2].complete().is_none());

        let series = PriceSeries::from_samples("BTC", Timeframe::Daily, samples).unwrap();
        assert_eq!(series.len(), 2);
        assert!((series.last_close() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CsvDataSource::new("/nonexistent/prices.csv"),
            Err(DataError::NoData(_))
        ));
    }

    #[tokio::test]
    async fn test_trailing_window_counts_from_last_row() {
        let file = write_csv(
            "timestamp,open,high,low,close,volume\n\
             2024-01-01,1,1,1,1,1\n\
             2024-05-20,2,2,2,2,1\n\
             2024-06-01,3,3,3,3,1\n",
        );
        let source = CsvDataSource::new(file.path()).unwrap();
        let window = FetchWindow::Trailing {
            days: 30,
            timeframe: Timeframe::Daily,
        };

        let samples = source.fetch_samples(Asset::Btc, &window).await.unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].close, Some(2.0));
    }
}
