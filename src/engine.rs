//! # Fusion Engine
//! Pure, testable logic that maps the per-request signals → `(fake_score, verdict, confidence)`.
//! No I/O; every upstream failure has already been replaced by a neutral default.
//!
//! Contributions are applied in a fixed order (lexical, patterns, source, sentiment,
//! readability, ML, fact-check, similarity, compound bonus, dampeners). Each non-zero step
//! is recorded so callers can see how the score was built.

use crate::analyze::fact_check::FactCheckResult;
use crate::analyze::lexical::LexicalSignal;
use crate::analyze::ml_adapter::MlPrediction;
use crate::analyze::patterns::PatternSignal;
use crate::analyze::readability::ReadabilityReport;
use crate::analyze::similarity::SimilarityResult;
use crate::analyze::source::SourceSignal;
use crate::config::scoring::{MlScoringConfig, ScoringConfig, Thresholds};
use crate::decision::{Contribution, SignalKind, SourceTier, Verdict};
use crate::sentiment::SentimentScores;

/// Every signal result for one request. Produced fresh, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Signals {
    pub lexical: LexicalSignal,
    pub patterns: PatternSignal,
    pub source: SourceSignal,
    pub sentiment: SentimentScores,
    pub readability: ReadabilityReport,
    pub ml: Option<MlPrediction>,
    pub fact_check: FactCheckResult,
    pub similarity: SimilarityResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FusedScore {
    /// Clamped to [0, 100].
    pub value: f64,
    pub contributions: Vec<Contribution>,
}

struct Accumulator {
    total: f64,
    contributions: Vec<Contribution>,
}

impl Accumulator {
    fn add(&mut self, signal: SignalKind, points: f64) {
        if points != 0.0 {
            self.total += points;
            self.contributions.push(Contribution { signal, points });
        }
    }

    /// Subtract `points` but never go below zero; records the effective delta.
    fn dampen(&mut self, points: f64) {
        let next = (self.total - points).max(0.0);
        let delta = next - self.total;
        self.add(SignalKind::Dampening, delta);
    }
}

pub fn fuse(s: &Signals, cfg: &ScoringConfig) -> FusedScore {
    let mut acc = Accumulator {
        total: 0.0,
        contributions: Vec::with_capacity(8),
    };
    let matches = s.lexical.count;
    let pattern_score = s.patterns.score;
    let tier = s.source.tier;

    // 1) Lexical
    let lx = &cfg.lexical;
    let first = matches.min(lx.first_matches) as f64 * lx.per_match_first;
    let extra = matches.saturating_sub(lx.first_matches) as f64 * lx.per_match_extra;
    acc.add(SignalKind::Lexical, (first + extra).min(lx.cap));

    // 2) Linguistic patterns
    acc.add(
        SignalKind::Patterns,
        (pattern_score * cfg.patterns.weight).min(cfg.patterns.cap),
    );

    // 3) Source tier
    let source_points = match tier {
        SourceTier::Low => cfg.source.low_points,
        SourceTier::High => cfg.source.high_points,
        SourceTier::Medium => 0.0,
    };
    acc.add(SignalKind::Source, source_points);

    // 4) Sentiment: extremes only count alongside lexical evidence
    let st = &cfg.sentiment;
    let compound = s.sentiment.compound;
    let mut sentiment_points = 0.0;
    if matches >= st.extreme_min_matches {
        if compound < st.negative_extreme {
            sentiment_points += st.negative_points;
        } else if compound > st.positive_extreme {
            sentiment_points += st.positive_points;
        }
    }
    if compound.abs() <= st.neutral_band {
        sentiment_points += st.neutral_points;
    }
    acc.add(SignalKind::Sentiment, sentiment_points);

    // 5) Readability
    acc.add(
        SignalKind::Readability,
        s.readability.suspicion_score * cfg.readability.weight,
    );

    // 6) ML
    if let Some(p) = &s.ml {
        acc.add(SignalKind::Ml, ml_points(p, &cfg.ml));
    }

    // 7) Fact-check
    if s.fact_check.needs_verification() {
        acc.add(
            SignalKind::FactCheck,
            cfg.fact_check.needs_verification_points,
        );
    }

    // 8) Similarity
    if s.similarity.similar {
        acc.add(
            SignalKind::Similarity,
            (s.similarity.confidence * cfg.similarity.weight).min(cfg.similarity.cap),
        );
    }

    // 9) Compound-indicator bonus
    let cb = &cfg.compound;
    let mut bonus = 0.0;
    if matches >= cb.min_matches && pattern_score >= cb.min_pattern_score {
        bonus += cb.points;
    }
    if matches >= cb.many_matches {
        bonus += cb.many_points;
    }
    acc.add(SignalKind::Compound, bonus);

    // 10) Clean-content dampeners
    let dp = &cfg.dampening;
    if tier == SourceTier::High && matches == 0 && pattern_score < dp.trusted_max_pattern {
        acc.dampen(dp.trusted_points);
    }
    if matches == 0 && pattern_score < dp.clean_max_pattern && tier != SourceTier::Low {
        acc.dampen(dp.clean_points);
    }

    FusedScore {
        value: acc.total.clamp(0.0, 100.0),
        contributions: acc.contributions,
    }
}

fn label_has(label: &str, needles: &[String]) -> bool {
    let upper = label.to_uppercase();
    needles.iter().any(|n| upper.contains(&n.to_uppercase()))
}

fn ml_points(p: &MlPrediction, cfg: &MlScoringConfig) -> f64 {
    if label_has(&p.label, &cfg.fake_labels) && p.score > cfg.strong_confidence {
        cfg.fake_points
    } else if label_has(&p.label, &cfg.real_labels) {
        if p.score > cfg.strong_confidence {
            cfg.real_strong_points
        } else if p.score > cfg.moderate_confidence {
            cfg.real_moderate_points
        } else {
            0.0
        }
    } else {
        0.0
    }
}

/// Thresholds are evaluated in order: Fake, then Real, then Doubtful.
pub fn classify(score: f64, tier: SourceTier, t: &Thresholds) -> (Verdict, f64) {
    let (verdict, confidence) = if score >= t.fake_min {
        let c = t.fake_base + (score - t.fake_min) * t.fake_slope;
        (Verdict::Fake, c.min(t.fake_max_confidence))
    } else if score <= t.real_max || (score <= t.trusted_real_max && tier == SourceTier::High) {
        let c = if tier == SourceTier::High {
            (t.trusted_real_base + (t.trusted_real_max - score) * t.trusted_real_slope)
                .min(t.trusted_real_max_confidence)
        } else {
            (t.real_base + (t.real_max - score) * t.real_slope).min(t.real_max_confidence)
        };
        (Verdict::Real, c)
    } else {
        let span = (t.fake_min - t.real_max).max(f64::EPSILON);
        let c = t.doubtful_base + ((score - t.real_max) / span) * t.doubtful_span;
        (
            Verdict::Doubtful,
            c.clamp(t.doubtful_min_confidence, t.doubtful_max_confidence),
        )
    };
    (verdict, confidence.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::fact_check::{ClaimPhraseChecker, FactChecker};

    fn quiet() -> Signals {
        Signals {
            lexical: LexicalSignal::default(),
            patterns: PatternSignal::default(),
            source: SourceSignal {
                tier: SourceTier::Medium,
                findings: vec![],
            },
            sentiment: SentimentScores {
                compound: 0.5,
                ..Default::default()
            },
            readability: ReadabilityReport::default(),
            ml: None,
            fact_check: FactCheckResult::unchecked(),
            similarity: SimilarityResult::default(),
        }
    }

    fn lexical(n: usize) -> LexicalSignal {
        LexicalSignal {
            count: n,
            matched: (0..n).map(|i| format!("p{i}")).collect(),
        }
    }

    fn points(f: &FusedScore, kind: SignalKind) -> f64 {
        f.contributions
            .iter()
            .filter(|c| c.signal == kind)
            .map(|c| c.points)
            .sum()
    }

    #[test]
    fn lexical_points_and_cap() {
        let cfg = ScoringConfig::default();
        for (n, want) in [(1, 9.0), (3, 27.0), (5, 45.0), (7, 45.0)] {
            let mut s = quiet();
            s.lexical = lexical(n);
            s.patterns.score = 40.0;
            assert_eq!(points(&fuse(&s, &cfg), SignalKind::Lexical), want, "n={n}");
        }

        let mut small = ScoringConfig::default();
        small.lexical.per_match_first = 5.0;
        small.lexical.per_match_extra = 3.0;
        let mut s = quiet();
        s.lexical = lexical(7);
        assert_eq!(points(&fuse(&s, &small), SignalKind::Lexical), 31.0);
    }

    #[test]
    fn pattern_weight_is_capped() {
        let cfg = ScoringConfig::default();
        let mut s = quiet();
        s.patterns.score = 100.0;
        assert_eq!(points(&fuse(&s, &cfg), SignalKind::Patterns), 35.0);
        s.patterns.score = 30.0;
        assert_eq!(points(&fuse(&s, &cfg), SignalKind::Patterns), 15.0);
    }

    #[test]
    fn sentiment_extremes_need_lexical_evidence() {
        let cfg = ScoringConfig::default();
        let mut s = quiet();
        s.patterns.score = 40.0;
        s.sentiment.compound = -0.9;
        assert_eq!(points(&fuse(&s, &cfg), SignalKind::Sentiment), 0.0);

        s.lexical = lexical(1);
        assert_eq!(points(&fuse(&s, &cfg), SignalKind::Sentiment), 5.0);

        s.sentiment.compound = 0.9;
        assert_eq!(points(&fuse(&s, &cfg), SignalKind::Sentiment), 3.0);

        s.lexical = LexicalSignal::default();
        s.sentiment.compound = 0.1;
        assert_eq!(points(&fuse(&s, &cfg), SignalKind::Sentiment), -3.0);
    }

    #[test]
    fn ml_label_rules() {
        let cfg = ScoringConfig::default();
        let p = |label: &str, score: f64| MlPrediction {
            label: label.into(),
            score,
        };
        assert_eq!(ml_points(&p("FAKE", 0.9), &cfg.ml), 15.0);
        assert_eq!(ml_points(&p("fake", 0.75), &cfg.ml), 0.0);
        assert_eq!(ml_points(&p("LABEL_REAL", 0.8), &cfg.ml), -10.0);
        assert_eq!(ml_points(&p("REAL", 0.75), &cfg.ml), -5.0);
        assert_eq!(ml_points(&p("REAL", 0.6), &cfg.ml), 0.0);
        assert_eq!(ml_points(&p("POSITIVE", 0.99), &cfg.ml), 0.0);
    }

    #[test]
    fn similarity_and_fact_check() {
        let cfg = ScoringConfig::default();
        let mut s = quiet();
        s.patterns.score = 40.0;
        s.lexical = lexical(1);
        s.similarity = SimilarityResult {
            similar: true,
            matched_patterns: vec!["chemtrails".into()],
            confidence: 20.0,
        };
        s.fact_check = ClaimPhraseChecker::default().check("according to them", None);
        let f = fuse(&s, &cfg);
        assert_eq!(points(&f, SignalKind::Similarity), 4.0);
        assert_eq!(points(&f, SignalKind::FactCheck), 15.0);
    }

    #[test]
    fn compound_bonus() {
        let cfg = ScoringConfig::default();
        let mut s = quiet();
        s.lexical = lexical(2);
        s.patterns.score = 30.0;
        assert_eq!(points(&fuse(&s, &cfg), SignalKind::Compound), 10.0);
        s.lexical = lexical(3);
        assert_eq!(points(&fuse(&s, &cfg), SignalKind::Compound), 15.0);
        s.patterns.score = 0.0;
        assert_eq!(points(&fuse(&s, &cfg), SignalKind::Compound), 5.0);
    }

    #[test]
    fn dampeners_floor_at_zero() {
        let cfg = ScoringConfig::default();
        let mut s = quiet();
        s.source.tier = SourceTier::High;
        s.patterns.score = 5.0;
        let f = fuse(&s, &cfg);
        // -20 source + 2.5 patterns = -17.5, floored to 0 by the first dampener.
        assert_eq!(f.value, 0.0);
        assert_eq!(points(&f, SignalKind::Dampening), 17.5);

        let mut low = quiet();
        low.source.tier = SourceTier::Low;
        let f = fuse(&low, &cfg);
        assert_eq!(points(&f, SignalKind::Dampening), 0.0);
        assert_eq!(f.value, 25.0);
    }

    #[test]
    fn score_is_clamped_to_100() {
        let cfg = ScoringConfig::default();
        let mut s = quiet();
        s.lexical = lexical(10);
        s.patterns.score = 100.0;
        s.source.tier = SourceTier::Low;
        s.sentiment.compound = -0.95;
        s.ml = Some(MlPrediction {
            label: "FAKE".into(),
            score: 0.99,
        });
        s.similarity = SimilarityResult {
            similar: true,
            matched_patterns: vec![],
            confidence: 80.0,
        };
        let f = fuse(&s, &cfg);
        assert_eq!(f.value, 100.0);
        assert!(f.contributions.iter().map(|c| c.points).sum::<f64>() > 100.0);
    }

    #[test]
    fn zero_contributions_are_not_recorded() {
        let cfg = ScoringConfig::default();
        let mut s = quiet();
        s.patterns.score = 40.0;
        let f = fuse(&s, &cfg);
        assert_eq!(
            f.contributions,
            vec![Contribution {
                signal: SignalKind::Patterns,
                points: 20.0
            }]
        );
    }

    #[test]
    fn classify_bands() {
        let t = Thresholds::default();
        assert_eq!(classify(60.0, SourceTier::Medium, &t), (Verdict::Fake, 70.0));
        assert_eq!(classify(100.0, SourceTier::Medium, &t), (Verdict::Fake, 95.0));
        assert_eq!(classify(15.0, SourceTier::Medium, &t), (Verdict::Real, 75.0));
        assert_eq!(classify(0.0, SourceTier::Low, &t), (Verdict::Real, 90.0));
        assert_eq!(classify(25.0, SourceTier::High, &t), (Verdict::Real, 85.0));
        assert_eq!(classify(5.0, SourceTier::High, &t), (Verdict::Real, 95.0));
        assert_eq!(classify(25.0, SourceTier::Medium, &t).0, Verdict::Doubtful);

        let (v, c) = classify(37.5, SourceTier::Medium, &t);
        assert_eq!(v, Verdict::Doubtful);
        assert!((c - 55.0).abs() < 1e-9);
        let (_, c) = classify(59.999, SourceTier::Medium, &t);
        assert!((50.0..=65.0).contains(&c));
    }
}
