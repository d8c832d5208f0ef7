//! Rule-based sentiment analyzer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::lexicon::{self, CAPS_INCR, NEGATIONS, NEGATION_SCALAR};

/// Normalization constant: compound = sum / sqrt(sum² + ALPHA).
const ALPHA: f64 = 15.0;
/// Emphasis per exclamation mark, up to four.
const EXCLAMATION_INCR: f64 = 0.292;
/// Emphasis per question mark when there are two or three.
const QUESTION_INCR: f64 = 0.18;
const QUESTION_MAX: f64 = 0.96;

/// Polarity of a text.
///
/// `pos`, `neg` and `neu` are proportions in [0, 1]; `compound` is the
/// normalized overall score in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScores {
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
    pub compound: f64,
}

/// Lexicon and rule based sentiment analyzer for short news text.
pub struct SentimentAnalyzer {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            valences: lexicon::valences(),
            boosters: lexicon::boosters(),
        }
    }

    /// Score a text.
    pub fn polarity_scores(&self, text: &str) -> SentimentScores {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|t| t.chars().count() > 1)
            .collect();

        if tokens.is_empty() {
            return SentimentScores::default();
        }

        let lower: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let shouting = tokens.iter().filter(|t| is_all_caps(t)).count();
        let caps_differ = shouting > 0 && shouting < tokens.len();

        let mut sentiments: Vec<f64> = (0..tokens.len())
            .map(|i| self.token_valence(&tokens, &lower, i, caps_differ))
            .collect();

        apply_contrast(&lower, &mut sentiments);

        score(&sentiments, punctuation_emphasis(text))
    }

    fn token_valence(&self, tokens: &[&str], lower: &[String], i: usize, caps_differ: bool) -> f64 {
        let word = lower[i].as_str();
        if self.boosters.contains_key(word) {
            return 0.0;
        }
        let Some(&base) = self.valences.get(word) else {
            return 0.0;
        };

        let mut valence = base;
        if caps_differ && is_all_caps(tokens[i]) {
            valence += CAPS_INCR.copysign(valence);
        }

        // Look back up to three words for intensifiers and negations
        for distance in 1..=3usize.min(i) {
            let j = i - distance;
            let prev = lower[j].as_str();

            if let Some(&boost) = self.boosters.get(prev) {
                let mut scalar = boost;
                if caps_differ && is_all_caps(tokens[j]) {
                    scalar += CAPS_INCR.copysign(boost);
                }
                if valence < 0.0 {
                    scalar = -scalar;
                }
                let decay = match distance {
                    1 => 1.0,
                    2 => 0.95,
                    _ => 0.9,
                };
                valence += scalar * decay;
            }

            if is_negation(prev) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

/// Words before "but" count half, words after count one and a half.
fn apply_contrast(lower: &[String], sentiments: &mut [f64]) {
    if let Some(pivot) = lower.iter().position(|w| w == "but") {
        for (i, s) in sentiments.iter_mut().enumerate() {
            if i < pivot {
                *s *= 0.5;
            } else if i > pivot {
                *s *= 1.5;
            }
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCR,
        _ => QUESTION_MAX,
    };
    exclamations * EXCLAMATION_INCR + question_emphasis
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn score(sentiments: &[f64], emphasis: f64) -> SentimentScores {
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0);

    let mut pos_sum: f64 = sentiments.iter().filter(|s| **s > 0.0).map(|s| s + 1.0).sum();
    let mut neg_sum: f64 = sentiments.iter().filter(|s| **s < 0.0).map(|s| s - 1.0).sum();
    let neutral = sentiments.iter().filter(|s| **s == 0.0).count() as f64;

    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neutral;
    if total == 0.0 {
        return SentimentScores::default();
    }

    SentimentScores {
        pos: round_to((pos_sum / total).abs(), 3),
        neg: round_to((neg_sum / total).abs(), 3),
        neu: round_to((neutral / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}
