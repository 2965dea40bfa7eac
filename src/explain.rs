//! Explanation composer: one sentence per triggered condition, fixed category order,
//! joined with ". ".

use crate::config::scoring::ExplanationConfig;
use crate::decision::SourceTier;
use crate::engine::Signals;

pub const DEFAULT_EXPLANATION: &str = "Content appears normal, but verification recommended";

pub fn compose(s: &Signals, cfg: &ExplanationConfig) -> String {
    let mut reasons: Vec<String> = Vec::new();

    if s.lexical.count > 0 {
        let shown: Vec<&str> = s
            .lexical
            .matched
            .iter()
            .take(cfg.max_keywords)
            .map(String::as_str)
            .collect();
        reasons.push(format!(
            "Found {} suspicious keyword(s): {}",
            s.lexical.count,
            shown.join(", ")
        ));
    }

    if s.patterns.score > cfg.pattern_score_min {
        reasons.push(format!(
            "Writing patterns suggest unreliable content. {}",
            head(&s.patterns.findings, cfg.max_pattern_findings).join(". ")
        ));
    }

    match s.source.tier {
        SourceTier::Low => reasons.push(format!(
            "Source reliability is low. {}",
            head(&s.source.findings, cfg.max_source_findings).join(". ")
        )),
        SourceTier::High => reasons.push(format!(
            "Source appears to be from a trusted domain. {}",
            head(&s.source.findings, cfg.max_source_findings).join(". ")
        )),
        SourceTier::Medium => {}
    }

    let compound = s.sentiment.compound;
    if compound < cfg.negative_sentiment {
        reasons.push(
            "Highly negative sentiment detected, which may indicate manipulative content".into(),
        );
    } else if compound > cfg.positive_sentiment {
        reasons.push("Extremely positive sentiment may indicate clickbait or exaggeration".into());
    }

    if s.readability.suspicion_score > cfg.readability_suspicion_min {
        reasons.push("Writing quality issues detected".into());
    }

    if let Some(p) = &s.ml {
        let label = p.label.to_uppercase();
        let flagged = cfg.ml_labels.iter().any(|l| label.contains(&l.to_uppercase()));
        if flagged && p.score > cfg.ml_confidence_min {
            reasons.push(format!(
                "ML analysis indicates suspicious content (confidence: {:.1}%)",
                p.score * 100.0
            ));
        }
    }

    if s.fact_check.checked {
        reasons.push("Contains fact-checkable claims that require verification".into());
    }

    if s.similarity.similar {
        reasons.push(format!(
            "Similar to known fake news patterns: {}",
            head(&s.similarity.matched_patterns, cfg.max_similarity_matches).join(", ")
        ));
    }

    if reasons.is_empty() {
        return DEFAULT_EXPLANATION.to_string();
    }
    reasons.join(". ")
}

fn head(items: &[String], n: usize) -> &[String] {
    &items[..items.len().min(n)]
}
