//! Readability signal.
//!
//! `ReadabilityProvider` computes the raw metrics; `analyze_readability` turns them into
//! a suspicion sub-score and absorbs any failure into a fixed neutral default.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::text::{PunctSentenceTokenizer, SentenceTokenizer};
use crate::config::scoring::ReadabilityConfig;
use crate::error::SignalError;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9]+(?:'[A-Za-z]+)?").expect("word regex"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadabilityMetrics {
    pub reading_ease: f64,
    pub grade_level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadabilityReport {
    pub flesch_score: f64,
    pub fk_grade: f64,
    pub suspicion_score: f64,
}

impl Default for ReadabilityReport {
    fn default() -> Self {
        Self {
            flesch_score: 50.0,
            fk_grade: 10.0,
            suspicion_score: 0.0,
        }
    }
}

pub trait ReadabilityProvider: Send + Sync {
    fn metrics(&self, text: &str) -> Result<ReadabilityMetrics, SignalError>;
}

pub fn analyze_readability(
    provider: Option<&dyn ReadabilityProvider>,
    text: &str,
    cfg: &ReadabilityConfig,
) -> ReadabilityReport {
    let Some(p) = provider else {
        return ReadabilityReport::default();
    };
    match p.metrics(text) {
        Ok(m) => {
            let suspicion_score = if m.reading_ease < cfg.low_ease {
                cfg.low_points
            } else if m.reading_ease > cfg.high_ease {
                cfg.high_points
            } else {
                0.0
            };
            ReadabilityReport {
                flesch_score: m.reading_ease,
                fk_grade: m.grade_level,
                suspicion_score,
            }
        }
        Err(e) => {
            debug!(error = %e, "readability unavailable; using neutral default");
            ReadabilityReport::default()
        }
    }
}

/// Flesch reading ease and Flesch-Kincaid grade with a vowel-group syllable estimate.
pub struct FleschReadability {
    tokenizer: Arc<dyn SentenceTokenizer>,
}

impl Default for FleschReadability {
    fn default() -> Self {
        Self::new(Arc::new(PunctSentenceTokenizer))
    }
}

impl FleschReadability {
    pub fn new(tokenizer: Arc<dyn SentenceTokenizer>) -> Self {
        Self { tokenizer }
    }
}

impl ReadabilityProvider for FleschReadability {
    fn metrics(&self, text: &str) -> Result<ReadabilityMetrics, SignalError> {
        let words: Vec<&str> = WORD_RE.find_iter(text).map(|m| m.as_str()).collect();
        if words.is_empty() {
            return Err(SignalError::InsufficientText("readability"));
        }
        let sentences = self.tokenizer.sentences(text).len().max(1) as f64;
        let word_count = words.len() as f64;
        let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

        let wps = word_count / sentences;
        let spw = syllables as f64 / word_count;

        Ok(ReadabilityMetrics {
            reading_ease: round2(206.835 - 1.015 * wps - 84.6 * spw),
            grade_level: round2(0.39 * wps + 11.8 * spw - 15.59),
        })
    }
}

/// Vowel-group count with a silent trailing `e` correction; never below 1.
pub fn count_syllables(word: &str) -> usize {
    let w: Vec<char> = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if w.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0usize;
    let mut prev_vowel = false;
    for &c in &w {
        let v = is_vowel(c);
        if v && !prev_vowel {
            groups += 1;
        }
        prev_vowel = v;
    }

    let n = w.len();
    let silent_e = n > 2 && w[n - 1] == 'e' && w[n - 2] != 'l' && !is_vowel(w[n - 2]);
    if silent_e && groups > 1 {
        groups -= 1;
    }
    groups.max(1)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
