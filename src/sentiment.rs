//! Sentiment polarity.
//!
//! `PolarityAnalyzer` is the injected collaborator; `LexiconSentiment` is the built-in
//! VADER-style implementation backed by `sentiment_lexicon.json`. `analyze_sentiment`
//! is the adapter the detector calls: an absent or failing analyzer yields all zeros.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::error::SignalError;

static LEXICON: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, f64>>(raw).expect("valid sentiment lexicon")
});

/// Polarity scores: `compound` in [-1, 1], `pos`/`neu`/`neg` in [0, 1] summing to ~1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub compound: f64,
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
}

pub trait PolarityAnalyzer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> Result<SentimentScores, SignalError>;
}

/// Adapter with the neutral-safe fallback.
pub fn analyze_sentiment(analyzer: Option<&dyn PolarityAnalyzer>, text: &str) -> SentimentScores {
    let Some(a) = analyzer else {
        return SentimentScores::default();
    };
    match a.polarity_scores(text) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "sentiment analyzer failed; using neutral scores");
            SentimentScores::default()
        }
    }
}

// Empirical VADER constants.
const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCR: f64 = 0.293;
const CAPS_INCR: f64 = 0.733;
const EXCLAMATION_INCR: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCR: f64 = 0.18;
const NORMALIZE_ALPHA: f64 = 15.0;

#[derive(Debug, Clone, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    /// Lexicon valence for a lower-cased word (0.0 if unknown).
    #[inline]
    fn word_valence(&self, w: &str) -> f64 {
        LEXICON.get(w).copied().unwrap_or(0.0)
    }

    fn scores(&self, text: &str) -> SentimentScores {
        let raw: Vec<&str> = tokenize(text).collect();
        if raw.is_empty() {
            return SentimentScores::default();
        }
        let lowered: Vec<String> = raw.iter().map(|t| t.to_lowercase()).collect();

        // ALL-CAPS emphasis only counts when the text mixes cases.
        let caps_count = raw.iter().filter(|t| is_all_caps(t)).count();
        let caps_differential = caps_count > 0 && caps_count < raw.len();

        let mut valences = Vec::with_capacity(raw.len());
        for i in 0..raw.len() {
            let w = lowered[i].as_str();
            let mut v = self.word_valence(w);
            if v == 0.0 || is_booster(w) {
                valences.push(0.0);
                continue;
            }

            if caps_differential && is_all_caps(raw[i]) {
                v += CAPS_INCR * v.signum();
            }

            // Boosters within the three preceding tokens, decaying with distance.
            for (k, damp) in [(1usize, 1.0f64), (2, 0.95), (3, 0.9)] {
                if i >= k && is_booster(lowered[i - k].as_str()) {
                    v += BOOSTER_INCR * damp * v.signum();
                }
            }

            // Negation: a negator in the last 1..=3 tokens flips and dampens.
            let negated = (1..=3).any(|k| i >= k && is_negator(lowered[i - k].as_str()));
            if negated {
                v *= NEGATION_SCALAR;
            }

            valences.push(v);
        }

        let emphasis = punctuation_emphasis(text);
        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = normalize(sum);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for v in &valences {
            if *v > 0.0 {
                pos_sum += v + 1.0;
            } else if *v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        if total <= 0.0 {
            return SentimentScores::default();
        }

        SentimentScores {
            compound: round_to(compound, 4),
            pos: round_to(pos_sum / total, 3),
            neu: round_to(neu_count / total, 3),
            neg: round_to(neg_sum.abs() / total, 3),
        }
    }
}

impl PolarityAnalyzer for LexiconSentiment {
    fn polarity_scores(&self, text: &str) -> Result<SentimentScores, SignalError> {
        Ok(self.scores(text))
    }
}

/// Whitespace tokens with surrounding punctuation trimmed; inner apostrophes kept.
fn tokenize(s: &str) -> impl Iterator<Item = &str> + '_ {
    s.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
}

fn is_all_caps(tok: &str) -> bool {
    tok.chars().any(|c| c.is_alphabetic()) && !tok.chars().any(|c| c.is_lowercase())
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "nor"
            | "neither"
            | "nothing"
            | "nobody"
            | "none"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "weren't"
            | "won't"
            | "can't"
            | "cannot"
            | "don't"
            | "doesn't"
            | "didn't"
            | "without"
    )
}

fn is_booster(tok: &str) -> bool {
    matches!(
        tok,
        "very"
            | "extremely"
            | "really"
            | "so"
            | "totally"
            | "absolutely"
            | "incredibly"
            | "completely"
            | "highly"
            | "hugely"
    )
}

fn punctuation_emphasis(text: &str) -> f64 {
    let ex = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64 * EXCLAMATION_INCR;
    let qm = text.matches('?').count();
    let q = match qm {
        0 | 1 => 0.0,
        2 | 3 => qm as f64 * QUESTION_INCR,
        _ => 0.96,
    };
    ex + q
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(x: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (x * f).round() / f
}
