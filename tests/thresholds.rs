// tests/thresholds.rs
//
// Boundary tests for the Fake / Doubtful / Real bands, both on `classify` directly and on
// synthetic signal combinations pushed through `fuse`.

use fake_news_detector::analyze::fact_check::FactCheckResult;
use fake_news_detector::analyze::lexical::LexicalSignal;
use fake_news_detector::analyze::patterns::PatternSignal;
use fake_news_detector::analyze::readability::ReadabilityReport;
use fake_news_detector::analyze::similarity::SimilarityResult;
use fake_news_detector::analyze::source::SourceSignal;
use fake_news_detector::config::scoring::Thresholds;
use fake_news_detector::engine::{classify, fuse, Signals};
use fake_news_detector::sentiment::SentimentScores;
use fake_news_detector::{ScoringConfig, SourceTier, Verdict};

fn signals(pattern_score: f64, tier: SourceTier) -> Signals {
    Signals {
        lexical: LexicalSignal::default(),
        patterns: PatternSignal {
            score: pattern_score,
            findings: vec![],
        },
        source: SourceSignal {
            tier,
            findings: vec![],
        },
        // Outside the neutral band and below the extremes: no sentiment points.
        sentiment: SentimentScores {
            compound: 0.5,
            pos: 0.5,
            neu: 0.5,
            neg: 0.0,
        },
        readability: ReadabilityReport::default(),
        ml: None,
        fact_check: FactCheckResult::unchecked(),
        similarity: SimilarityResult::default(),
    }
}

#[test]
fn sixty_is_fake_inclusive() {
    let cfg = ScoringConfig::default();
    // 70 * 0.5 = 35 (pattern cap) + 25 (low tier) = 60
    let fused = fuse(&signals(70.0, SourceTier::Low), &cfg);
    assert_eq!(fused.value, 60.0);
    let (v, c) = classify(fused.value, SourceTier::Low, &cfg.thresholds);
    assert_eq!(v, Verdict::Fake);
    assert_eq!(c, 70.0);
}

#[test]
fn just_below_sixty_is_doubtful() {
    let cfg = ScoringConfig::default();
    let fused = fuse(&signals(69.998, SourceTier::Low), &cfg);
    assert!(fused.value < 60.0 && fused.value > 59.99, "{}", fused.value);
    let (v, c) = classify(fused.value, SourceTier::Low, &cfg.thresholds);
    assert_eq!(v, Verdict::Doubtful);
    assert!((59.9..=60.0).contains(&c), "{c}");

    let (v, _) = classify(59.999, SourceTier::Medium, &cfg.thresholds);
    assert_eq!(v, Verdict::Doubtful);
}

#[test]
fn real_band_edges() {
    let t = Thresholds::default();
    assert_eq!(classify(15.0, SourceTier::Medium, &t).0, Verdict::Real);
    assert_eq!(classify(15.001, SourceTier::Medium, &t).0, Verdict::Doubtful);
    assert_eq!(classify(25.0, SourceTier::High, &t).0, Verdict::Real);
    assert_eq!(classify(25.001, SourceTier::High, &t).0, Verdict::Doubtful);
    assert_eq!(classify(20.0, SourceTier::Low, &t).0, Verdict::Doubtful);
}

#[test]
fn confidence_curves_stay_in_band() {
    let t = Thresholds::default();
    let mut s = 0.0;
    while s <= 100.0 {
        for tier in [SourceTier::Low, SourceTier::Medium, SourceTier::High] {
            let (v, c) = classify(s, tier, &t);
            let (lo, hi) = match v {
                Verdict::Fake => (70.0, 95.0),
                Verdict::Doubtful => (50.0, 65.0),
                Verdict::Real if tier == SourceTier::High => (85.0, 95.0),
                Verdict::Real => (75.0, 90.0),
            };
            assert!((lo..=hi).contains(&c), "score={s} tier={tier:?} conf={c}");
        }
        s += 0.25;
    }
}

#[test]
fn custom_thresholds_move_the_boundary() {
    let cfg = ScoringConfig::from_toml_str(
        r#"
        [thresholds]
        fake_min = 50.0
        "#,
    )
    .unwrap();
    assert_eq!(classify(50.0, SourceTier::Medium, &cfg.thresholds).0, Verdict::Fake);
    assert_eq!(classify(49.9, SourceTier::Medium, &cfg.thresholds).0, Verdict::Doubtful);
}
