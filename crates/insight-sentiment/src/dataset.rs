//! Scored news rows.

use chrono::NaiveDate;
use insight_core::types::{Article, Asset};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::analyzer::{SentimentAnalyzer, SentimentScores};

/// One scored article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentRow {
    pub symbol: Asset,
    pub date: Option<NaiveDate>,
    pub title: String,
    pub compound: f64,
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
}

impl SentimentRow {
    pub fn scores(&self) -> SentimentScores {
        SentimentScores {
            pos: self.pos,
            neg: self.neg,
            neu: self.neu,
            compound: self.compound,
        }
    }
}

/// Scored articles across one or more symbols, in fetch order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SentimentDataset {
    rows: Vec<SentimentRow>,
}

impl SentimentDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `title. description` of each article and append a row.
    pub fn extend_scored(
        &mut self,
        analyzer: &SentimentAnalyzer,
        symbol: Asset,
        articles: &[Article],
    ) {
        for article in articles {
            let scores = analyzer.polarity_scores(&article.text());
            self.rows.push(SentimentRow {
                symbol,
                date: article.date(),
                title: article.title.clone(),
                compound: scores.compound,
                pos: scores.pos,
                neg: scores.neg,
                neu: scores.neu,
            });
        }
        debug!(%symbol, scored = articles.len(), total = self.rows.len(), "Scored articles");
    }

    pub fn rows(&self) -> &[SentimentRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mean of each score over every row.
    pub fn averages(&self) -> Option<SentimentScores> {
        mean(self.rows.iter())
    }

    /// Rows grouped by symbol, symbols in selector order.
    pub fn by_symbol(&self) -> BTreeMap<Asset, Vec<&SentimentRow>> {
        let mut groups: BTreeMap<Asset, Vec<&SentimentRow>> = BTreeMap::new();
        for row in &self.rows {
            groups.entry(row.symbol).or_default().push(row);
        }
        groups
    }

    /// Mean scores for one symbol.
    pub fn averages_for(&self, symbol: Asset) -> Option<SentimentScores> {
        mean(self.rows.iter().filter(|r| r.symbol == symbol))
    }
}

fn mean<'a>(rows: impl Iterator<Item = &'a SentimentRow>) -> Option<SentimentScores> {
    let (count, total) = rows.fold((0usize, SentimentScores::default()), |(n, acc), row| {
        (
            n + 1,
            SentimentScores {
                pos: acc.pos + row.pos,
                neg: acc.neg + row.neg,
                neu: acc.neu + row.neu,
                compound: acc.compound + row.compound,
            },
        )
    });

    if count == 0 {
        return None;
    }

    let n = count as f64;
    Some(SentimentScores {
        pos: total.pos / n,
        neg: total.neg / n,
        neu: total.neu / n,
        compound: total.compound / n,
    })
}
