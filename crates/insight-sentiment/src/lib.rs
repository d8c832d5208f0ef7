//! News sentiment scoring.
//!
//! [`SentimentAnalyzer`] scores free text with a valence lexicon and
//! heuristics for negation, intensifiers, capitalisation, contrast and
//! punctuation. [`SentimentDataset`] collects scored articles per symbol.

mod analyzer;
mod dataset;
mod lexicon;

pub use analyzer::{SentimentAnalyzer, SentimentScores};
pub use dataset::{SentimentDataset, SentimentRow};
