//! Sentiment spreadsheet and document exports.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use insight_core::error::ExportError;
use insight_core::types::Asset;
use insight_sentiment::{SentimentDataset, SentimentRow, SentimentScores};
use insight_signals::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::chart::{draw_pie, PieSlice};

const NEUTRAL_GREY: Rgb = Rgb(127, 127, 127);

/// Where and how exports are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub spreadsheet_name: String,
    pub document_name: String,
    /// Size of rendered technical charts, in pixels
    pub chart_width: u32,
    pub chart_height: u32,
    /// Side of each sentiment pie chart, in pixels
    pub pie_size: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            spreadsheet_name: "sentiment.csv".to_string(),
            document_name: "sentiment_report.html".to_string(),
            chart_width: 1400,
            chart_height: 1000,
            pie_size: 400,
        }
    }
}

/// Paths written by [`ReportExporter::export_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub spreadsheet: PathBuf,
    pub document: PathBuf,
}

pub struct ReportExporter {
    config: ExportConfig,
}

impl ReportExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Path for a technical chart of `asset`.
    pub fn chart_path(&self, asset: Asset, extension: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}_technical.{}", asset.symbol().to_lowercase(), extension))
    }

    /// One row per scored article: symbol, date, title and the four scores.
    pub fn export_spreadsheet(&self, data: &SentimentDataset) -> Result<PathBuf, ExportError> {
        ensure_rows(data)?;
        fs::create_dir_all(&self.config.output_dir)?;
        let path = self.config.output_dir.join(&self.config.spreadsheet_name);

        let mut writer = csv::Writer::from_path(&path).map_err(csv_error)?;
        for row in data.rows() {
            writer.serialize(row).map_err(csv_error)?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = data.len(), "Exported sentiment spreadsheet");
        Ok(path)
    }

    /// Paginated HTML report: a title page, then one section per symbol with
    /// its articles and a pie chart of the mean scores.
    pub fn export_document(&self, data: &SentimentDataset) -> Result<PathBuf, ExportError> {
        ensure_rows(data)?;
        fs::create_dir_all(&self.config.output_dir)?;
        let path = self.config.output_dir.join(&self.config.document_name);

        let mut html = String::from(DOCUMENT_HEAD);
        html.push_str("<h1>Financial News Sentiment Analysis</h1>\n");

        for (symbol, rows) in data.by_symbol() {
            let Some(means) = data.averages_for(symbol) else {
                continue;
            };
            let png = self.pie_chart(symbol, &means)?;
            html.push_str(&symbol_section(symbol, &rows, &means, &png));
        }

        html.push_str("</body>\n</html>\n");
        fs::write(&path, html)?;

        info!(path = %path.display(), "Exported sentiment document");
        Ok(path)
    }

    /// Write both the spreadsheet and the document.
    pub fn export_all(&self, data: &SentimentDataset) -> Result<ExportedFiles, ExportError> {
        Ok(ExportedFiles {
            spreadsheet: self.export_spreadsheet(data)?,
            document: self.export_document(data)?,
        })
    }

    /// Render the pie to a temporary PNG and return it base64 encoded. The
    /// temporary file is removed when it goes out of scope.
    fn pie_chart(&self, symbol: Asset, means: &SentimentScores) -> Result<String, ExportError> {
        let file = tempfile::Builder::new()
            .prefix(&format!("{}-sentiment-", symbol))
            .suffix(".png")
            .tempfile_in(&self.config.output_dir)?;

        let slices = [
            PieSlice { label: "Positive", share: means.pos, color: Rgb::GREEN },
            PieSlice { label: "Negative", share: means.neg, color: Rgb::RED },
            PieSlice { label: "Neutral", share: means.neu, color: NEUTRAL_GREY },
        ];
        draw_pie(file.path(), self.config.pie_size, &slices)?;

        let bytes = fs::read(file.path())?;
        debug!(%symbol, bytes = bytes.len(), "Rendered sentiment pie");
        Ok(STANDARD.encode(bytes))
    }
}

fn ensure_rows(data: &SentimentDataset) -> Result<(), ExportError> {
    if data.is_empty() {
        return Err(ExportError::Empty("sentiment dataset".to_string()));
    }
    Ok(())
}

fn csv_error(e: csv::Error) -> ExportError {
    ExportError::Csv(e.to_string())
}

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Financial News Sentiment Analysis</title>
<style>
body { font-family: Helvetica, Arial, sans-serif; margin: 2cm; }
h1 { text-align: center; page-break-after: always; }
section { page-break-before: always; }
.article { margin-bottom: 1em; }
.date { color: #555; }
figure { text-align: center; }
@page { size: A4; margin: 2cm; }
</style>
</head>
<body>
"#;

fn symbol_section(symbol: Asset, rows: &[&SentimentRow], means: &SentimentScores, png: &str) -> String {
    let mut out = format!("<section>\n<h2>Symbol: {}</h2>\n", symbol);

    for row in rows {
        let date = row
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown date".to_string());
        out.push_str(&format!(
            "<div class=\"article\"><span class=\"date\">{}</span> {}<br>Overall sentiment: {:.2}</div>\n",
            date,
            escape(&row.title),
            row.compound
        ));
    }

    out.push_str(&format!(
        "<figure>\n<img alt=\"{symbol} sentiment\" src=\"data:image/png;base64,{png}\">\n\
         <figcaption>Sentiment distribution for {symbol}: positive {:.1}%, negative {:.1}%, neutral {:.1}%</figcaption>\n\
         </figure>\n</section>\n",
        means.pos * 100.0,
        means.neg * 100.0,
        means.neu * 100.0,
    ));

    out
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
