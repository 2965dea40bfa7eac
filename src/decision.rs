//! decision.rs: verdict, source tier and the report returned to callers.
//!
//! The report is built once per request and never stored; `details` carries every raw
//! signal so a caller can see why the verdict came out the way it did.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::analyze::fact_check::FactCheckResult;
use crate::analyze::ml_adapter::MlPrediction;
use crate::analyze::readability::ReadabilityReport;
use crate::analyze::similarity::SimilarityResult;
use crate::engine::{FusedScore, Signals};
use crate::sentiment::SentimentScores;

/// Final three-way classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Fake,
    Doubtful,
    Real,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Fake => "Fake",
            Verdict::Doubtful => "Doubtful",
            Verdict::Real => "Real",
        }
    }
}

/// Three-level trust classification of the source URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTier {
    High,
    Medium,
    Low,
}

/// Which signal a score contribution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Lexical,
    Patterns,
    Source,
    Sentiment,
    Readability,
    Ml,
    FactCheck,
    Similarity,
    Compound,
    Dampening,
}

/// One signed step of the fused score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub signal: SignalKind,
    pub points: f64,
}

/// Everything the fusion step looked at, flattened for the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionDetails {
    pub keyword_count: usize,
    pub matched_keywords: Vec<String>,
    pub pattern_score: f64,
    pub pattern_findings: Vec<String>,
    pub source_reliability: SourceTier,
    pub source_findings: Vec<String>,
    pub sentiment: SentimentScores,
    pub readability: ReadabilityReport,
    pub ml_classification: Option<MlPrediction>,
    pub fact_check: FactCheckResult,
    pub similarity_check: SimilarityResult,
    pub score_breakdown: Vec<Contribution>,
    pub final_score: f64,
}

/// Externally visible result of one detection call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    #[serde(rename = "result")]
    pub verdict: Verdict,
    /// Percentage in [0, 100], rounded to two decimals.
    pub confidence: f64,
    pub explanation: String,
    pub source_credibility: SourceTier,
    /// `None` serializes as `{}` (short-circuited input).
    #[serde(serialize_with = "details_or_empty_map")]
    pub details: Option<DetectionDetails>,
}

pub const INSUFFICIENT_TEXT_EXPLANATION: &str = "Text is too short to analyze properly";

impl DetectionReport {
    /// Fixed answer for text too short to analyze.
    pub fn insufficient_text() -> Self {
        Self {
            verdict: Verdict::Doubtful,
            confidence: 50.0,
            explanation: INSUFFICIENT_TEXT_EXPLANATION.to_string(),
            source_credibility: SourceTier::Medium,
            details: None,
        }
    }

    pub fn from_signals(
        verdict: Verdict,
        confidence: f64,
        explanation: String,
        signals: Signals,
        fused: FusedScore,
    ) -> Self {
        let tier = signals.source.tier;
        let details = DetectionDetails {
            keyword_count: signals.lexical.count,
            matched_keywords: signals.lexical.matched,
            pattern_score: round2(signals.patterns.score),
            pattern_findings: signals.patterns.findings,
            source_reliability: tier,
            source_findings: signals.source.findings,
            sentiment: signals.sentiment,
            readability: signals.readability,
            ml_classification: signals.ml,
            fact_check: signals.fact_check,
            similarity_check: signals.similarity,
            score_breakdown: fused.contributions,
            final_score: round2(fused.value),
        };
        Self {
            verdict,
            confidence: round2(confidence),
            explanation,
            source_credibility: tier,
            details: Some(details),
        }
    }
}

fn details_or_empty_map<S: Serializer>(
    details: &Option<DetectionDetails>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match details {
        Some(d) => d.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insufficient_text_serializes_with_empty_details() {
        let v = serde_json::to_value(DetectionReport::insufficient_text()).unwrap();
        assert_eq!(v["result"], json!("Doubtful"));
        assert_eq!(v["confidence"], json!(50.0));
        assert_eq!(v["source_credibility"], json!("medium"));
        assert_eq!(v["details"], json!({}));
        assert_eq!(v["explanation"], json!(INSUFFICIENT_TEXT_EXPLANATION));
    }

    #[test]
    fn enums_use_wire_casing() {
        assert_eq!(serde_json::to_value(Verdict::Fake).unwrap(), json!("Fake"));
        assert_eq!(serde_json::to_value(SourceTier::High).unwrap(), json!("high"));
        assert_eq!(
            serde_json::to_value(SignalKind::FactCheck).unwrap(),
            json!("fact_check")
        );
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(12.346), 12.35);
        assert_eq!(round2(79.0), 79.0);
        assert_eq!(round2(-3.0049), -3.0);
    }
}
