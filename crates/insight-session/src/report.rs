//! Session report rendering.

use insight_core::types::{Fundamentals, OnchainMetric};
use insight_sentiment::SentimentDataset;
use insight_signals::TechnicalAnalysis;
use serde::Serialize;

use crate::session::StageOutcome;

const BANNER: &str = "═══════════════════════════════════════════════════════════\n";
const RULE: &str = "───────────────────────────────────────────────────────────\n";

/// Outcome of every stage of one run.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub symbol: String,
    pub technical: StageOutcome<TechnicalAnalysis>,
    pub fundamentals: StageOutcome<Fundamentals>,
    pub sentiment: StageOutcome<SentimentDataset>,
    pub onchain: StageOutcome<Vec<OnchainMetric>>,
}

impl SessionReport {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str(BANNER);
        s.push_str(&format!("{:^59}\n", format!("CRYPTO INSIGHT REPORT: {}", self.symbol)));
        s.push_str(BANNER);
        s.push('\n');

        section(&mut s, "TECHNICAL ANALYSIS", &self.technical, |s, t| {
            s.push_str(&format!("  Signal:              {}\n", t.signal));
            s.push_str(&format!("  Trend:               {}\n", t.trend));
            s.push_str(&format!("  Last Price:          ${:.2}\n", t.last_price));
            s.push_str(&format!("  Bars:                {} ({})\n", t.bars, t.timeframe));
        });

        section(&mut s, "FUNDAMENTALS", &self.fundamentals, |s, f| {
            for (label, value) in f.metrics() {
                s.push_str(&format!("  {:<21}{}\n", format!("{}:", label), value));
            }
        });

        section(&mut s, "NEWS SENTIMENT", &self.sentiment, |s, data| {
            s.push_str(&format!("  Articles:            {}\n", data.len()));
            if let Some(mean) = data.averages() {
                s.push_str(&format!(
                    "  Mean Scores:         compound {:.3}  pos {:.3}  neg {:.3}  neu {:.3}\n",
                    mean.compound, mean.pos, mean.neg, mean.neu
                ));
            }
            for (symbol, rows) in data.by_symbol() {
                if let Some(mean) = data.averages_for(symbol) {
                    s.push_str(&format!(
                        "  {:<21}{:+.3} over {} article(s)\n",
                        format!("{}:", symbol),
                        mean.compound,
                        rows.len()
                    ));
                }
            }
        });

        section(&mut s, "ON-CHAIN METRICS", &self.onchain, |s, metrics| {
            if metrics.is_empty() {
                s.push_str("  No metrics reported\n");
            }
            for metric in metrics {
                s.push_str(&format!(
                    "  {:<21}{} {}\n",
                    format!("{}:", metric.name),
                    metric.value,
                    metric.unit
                ));
            }
        });

        s.push_str(BANNER);
        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn section<T>(s: &mut String, title: &str, outcome: &StageOutcome<T>, body: impl FnOnce(&mut String, &T)) {
    s.push_str(title);
    s.push('\n');
    s.push_str(RULE);
    match outcome {
        StageOutcome::Ready(value) => body(s, value),
        StageOutcome::Failed { message } => s.push_str(&format!("  Error: {}\n", message)),
        StageOutcome::Skipped => s.push_str("  Skipped\n"),
    }
    s.push('\n');
}
