//! Linguistic pattern analyzer: surface-form anomalies scored additively.
//!
//! Checks (fixed order, each contributes points + one finding when triggered):
//! 1. capitalized-character ratio
//! 2. exclamation marks, then question marks
//! 3. text length / content depth
//! 4. sentence-terminator density
//! 5. word repetition among longer words
//!
//! The score is clamped to [0, 100].

use serde::Serialize;
use std::collections::HashMap;

use super::text::{sentence_count, SentenceTokenizer};
use crate::config::scoring::PatternConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternSignal {
    pub score: f64,
    pub findings: Vec<String>,
}

impl PatternSignal {
    fn add(&mut self, points: f64, finding: impl Into<String>) {
        self.score += points;
        self.findings.push(finding.into());
    }
}

pub fn analyze_patterns(
    text: &str,
    tokenizer: Option<&dyn SentenceTokenizer>,
    cfg: &PatternConfig,
) -> PatternSignal {
    let mut out = PatternSignal::default();

    let total_chars = text.chars().count();
    if total_chars > 0 {
        let upper = text.chars().filter(|c| c.is_uppercase()).count();
        if upper as f64 / total_chars as f64 > cfg.caps_ratio {
            out.add(cfg.caps_points, "Excessive capitalization detected");
        }
    }

    let exclamations = text.matches('!').count();
    let questions = text.matches('?').count();
    if exclamations > cfg.exclamation_limit {
        out.add(
            cfg.exclamation_points,
            format!("Excessive exclamation marks ({exclamations})"),
        );
    }
    if questions > cfg.question_limit {
        out.add(
            cfg.question_points,
            format!("Excessive question marks ({questions})"),
        );
    }

    let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    let word_count = words.len();
    let sentences = sentence_count(text, tokenizer);

    if word_count < cfg.min_words {
        out.add(cfg.short_points, "Text too short for reliable analysis");
    } else if word_count < cfg.shallow_words && sentences < cfg.shallow_sentences {
        out.add(cfg.shallow_points, "Insufficient content depth");
    }

    let periods = text.matches('.').count();
    if (periods as f64) < word_count as f64 / cfg.words_per_period
        && word_count > cfg.punctuation_min_words
    {
        out.add(cfg.punctuation_points, "Poor punctuation structure");
    }

    let max_repeat = max_word_repeat(&words, cfg.repeat_min_len) as f64;
    if max_repeat > cfg.repeat_high_ratio * word_count as f64 {
        out.add(cfg.repeat_high_points, "Excessive word repetition detected");
    } else if max_repeat > cfg.repeat_low_ratio * word_count as f64 {
        out.add(cfg.repeat_low_points, "Noticeable word repetition detected");
    }

    out.score = out.score.clamp(0.0, 100.0);
    out
}

/// Highest frequency of any single word longer than `min_len` characters.
fn max_word_repeat(words: &[String], min_len: usize) -> usize {
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for w in words {
        if w.chars().count() > min_len {
            *freq.entry(w.as_str()).or_insert(0) += 1;
        }
    }
    freq.values().copied().max().unwrap_or(0)
}
