//! Fact-check signal.
//!
//! `ClaimPhraseChecker` is a placeholder: it only flags text that contains a claim-style
//! phrase. A real backend can be substituted behind `FactChecker` without touching fusion.

use serde::{Deserialize, Serialize};

use super::phrases::CLAIM_PHRASES;

pub const VERIFICATION_NOTE: &str =
    "Note: This claim should be verified with fact-checking services";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactCheckVerdict {
    NeedsVerification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub checked: bool,
    pub verdict: Option<FactCheckVerdict>,
    pub confidence: f64,
    pub notes: Vec<String>,
}

impl FactCheckResult {
    pub fn unchecked() -> Self {
        Self {
            checked: false,
            verdict: None,
            confidence: 0.0,
            notes: Vec::new(),
        }
    }

    pub fn needs_verification(&self) -> bool {
        self.checked && self.verdict == Some(FactCheckVerdict::NeedsVerification)
    }
}

impl Default for FactCheckResult {
    fn default() -> Self {
        Self::unchecked()
    }
}

pub trait FactChecker: Send + Sync {
    /// `url` is accepted for backends that can use it; the phrase checker ignores it.
    fn check(&self, text: &str, url: Option<&str>) -> FactCheckResult;
}

#[derive(Debug, Clone, Copy)]
pub struct ClaimPhraseChecker {
    phrases: &'static [&'static str],
}

impl Default for ClaimPhraseChecker {
    fn default() -> Self {
        Self {
            phrases: CLAIM_PHRASES,
        }
    }
}

impl ClaimPhraseChecker {
    pub fn with_phrases(phrases: &'static [&'static str]) -> Self {
        Self { phrases }
    }
}

impl FactChecker for ClaimPhraseChecker {
    fn check(&self, text: &str, _url: Option<&str>) -> FactCheckResult {
        let lower = text.to_lowercase();
        if !self.phrases.iter().any(|p| lower.contains(p)) {
            return FactCheckResult::unchecked();
        }
        FactCheckResult {
            checked: true,
            verdict: Some(FactCheckVerdict::NeedsVerification),
            confidence: 30.0,
            notes: vec![VERIFICATION_NOTE.to_string()],
        }
    }
}
