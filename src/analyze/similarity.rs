//! Similarity signal: substring match against known fake-narrative phrases.
//!
//! Stands in for an embedding search; `SimilarityChecker` is the swap point.

use serde::{Deserialize, Serialize};

use super::phrases::KNOWN_FAKE_PATTERNS;
use crate::config::scoring::SimilarityConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub similar: bool,
    pub matched_patterns: Vec<String>,
    pub confidence: f64,
}

pub trait SimilarityChecker: Send + Sync {
    fn check(&self, text: &str) -> SimilarityResult;
}

#[derive(Debug, Clone, Copy)]
pub struct KnownPatternMatcher {
    patterns: &'static [&'static str],
    per_match: f64,
    max_confidence: f64,
}

impl KnownPatternMatcher {
    pub fn new(cfg: &SimilarityConfig) -> Self {
        Self {
            patterns: KNOWN_FAKE_PATTERNS,
            per_match: cfg.per_match,
            max_confidence: cfg.max_confidence,
        }
    }
}

impl Default for KnownPatternMatcher {
    fn default() -> Self {
        Self::new(&SimilarityConfig::default())
    }
}

impl SimilarityChecker for KnownPatternMatcher {
    fn check(&self, text: &str) -> SimilarityResult {
        let lower = text.to_lowercase();
        let matched: Vec<String> = self
            .patterns
            .iter()
            .filter(|p| lower.contains(**p))
            .map(|p| p.to_string())
            .collect();
        if matched.is_empty() {
            return SimilarityResult::default();
        }
        let confidence = (self.per_match * matched.len() as f64).min(self.max_confidence);
        SimilarityResult {
            similar: true,
            matched_patterns: matched,
            confidence,
        }
    }
}
