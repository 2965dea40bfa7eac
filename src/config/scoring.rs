//! Scoring configuration (TOML, `config/scoring.toml`).
//!
//! Every point value, cap, ratio and threshold used by the analyzers, the fusion step and the
//! explanation composer lives here so the model can be recalibrated without touching code.
//! All sections are `#[serde(default)]`: a partial file only overrides the keys it names.
//!
//! ```toml
//! [lexical]
//! per_match_first = 9.0
//! cap = 45.0
//!
//! [thresholds]
//! fake_min = 60.0
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use tracing::info;

pub const DEFAULT_SCORING_CONFIG_PATH: &str = "config/scoring.toml";
pub const ENV_SCORING_CONFIG_PATH: &str = "DETECTOR_SCORING_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub input: InputConfig,
    pub lexical: LexicalConfig,
    pub patterns: PatternConfig,
    pub source: SourceConfig,
    pub sentiment: SentimentConfig,
    pub readability: ReadabilityConfig,
    pub ml: MlScoringConfig,
    pub fact_check: FactCheckConfig,
    pub similarity: SimilarityConfig,
    pub compound: CompoundConfig,
    pub dampening: DampeningConfig,
    pub thresholds: Thresholds,
    pub explanation: ExplanationConfig,
}

/// Texts shorter than `min_chars` (after trimming) are not analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub min_chars: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { min_chars: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalConfig {
    /// How many matches are worth `per_match_first`.
    pub first_matches: usize,
    pub per_match_first: f64,
    pub per_match_extra: f64,
    pub cap: f64,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            first_matches: 5,
            per_match_first: 9.0,
            per_match_extra: 5.0,
            cap: 45.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub caps_ratio: f64,
    pub caps_points: f64,
    pub exclamation_limit: usize,
    pub exclamation_points: f64,
    pub question_limit: usize,
    pub question_points: f64,
    pub min_words: usize,
    pub short_points: f64,
    pub shallow_words: usize,
    pub shallow_sentences: usize,
    pub shallow_points: f64,
    /// One period expected per this many words.
    pub words_per_period: f64,
    pub punctuation_min_words: usize,
    pub punctuation_points: f64,
    /// Only words strictly longer than this take part in the repetition check.
    pub repeat_min_len: usize,
    pub repeat_high_ratio: f64,
    pub repeat_high_points: f64,
    pub repeat_low_ratio: f64,
    pub repeat_low_points: f64,
    /// Weight of the pattern score in the fused score, and its cap.
    pub weight: f64,
    pub cap: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            caps_ratio: 0.3,
            caps_points: 25.0,
            exclamation_limit: 3,
            exclamation_points: 20.0,
            question_limit: 5,
            question_points: 15.0,
            min_words: 10,
            short_points: 15.0,
            shallow_words: 50,
            shallow_sentences: 3,
            shallow_points: 10.0,
            words_per_period: 20.0,
            punctuation_min_words: 20,
            punctuation_points: 10.0,
            repeat_min_len: 3,
            repeat_high_ratio: 0.15,
            repeat_high_points: 25.0,
            repeat_low_ratio: 0.08,
            repeat_low_points: 15.0,
            weight: 0.5,
            cap: 35.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub low_points: f64,
    pub high_points: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            low_points: 25.0,
            high_points: -20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Extreme-tone points only apply with at least this many lexical matches.
    pub extreme_min_matches: usize,
    pub negative_extreme: f64,
    pub negative_points: f64,
    pub positive_extreme: f64,
    pub positive_points: f64,
    /// |compound| <= neutral_band earns `neutral_points`.
    pub neutral_band: f64,
    pub neutral_points: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            extreme_min_matches: 1,
            negative_extreme: -0.8,
            negative_points: 5.0,
            positive_extreme: 0.85,
            positive_points: 3.0,
            neutral_band: 0.2,
            neutral_points: -3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityConfig {
    pub low_ease: f64,
    pub low_points: f64,
    pub high_ease: f64,
    pub high_points: f64,
    pub weight: f64,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self {
            low_ease: 10.0,
            low_points: 5.0,
            high_ease: 95.0,
            high_points: 3.0,
            weight: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlScoringConfig {
    /// Label substrings (case-insensitive) meaning "fake".
    pub fake_labels: Vec<String>,
    /// Label substrings (case-insensitive) meaning "real".
    pub real_labels: Vec<String>,
    pub strong_confidence: f64,
    pub moderate_confidence: f64,
    pub fake_points: f64,
    pub real_strong_points: f64,
    pub real_moderate_points: f64,
}

impl Default for MlScoringConfig {
    fn default() -> Self {
        Self {
            fake_labels: vec!["FAKE".into()],
            real_labels: vec!["REAL".into()],
            strong_confidence: 0.75,
            moderate_confidence: 0.6,
            fake_points: 15.0,
            real_strong_points: -10.0,
            real_moderate_points: -5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactCheckConfig {
    pub needs_verification_points: f64,
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            needs_verification_points: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub per_match: f64,
    pub max_confidence: f64,
    pub weight: f64,
    pub cap: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            per_match: 20.0,
            max_confidence: 80.0,
            weight: 0.2,
            cap: 20.0,
        }
    }
}

/// Bonus when several independent indicators fire together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundConfig {
    pub min_matches: usize,
    pub min_pattern_score: f64,
    pub points: f64,
    pub many_matches: usize,
    pub many_points: f64,
}

impl Default for CompoundConfig {
    fn default() -> Self {
        Self {
            min_matches: 2,
            min_pattern_score: 30.0,
            points: 10.0,
            many_matches: 3,
            many_points: 5.0,
        }
    }
}

/// Subtractions for clean content; each floors the running score at 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DampeningConfig {
    pub trusted_max_pattern: f64,
    pub trusted_points: f64,
    pub clean_max_pattern: f64,
    pub clean_points: f64,
}

impl Default for DampeningConfig {
    fn default() -> Self {
        Self {
            trusted_max_pattern: 20.0,
            trusted_points: 15.0,
            clean_max_pattern: 10.0,
            clean_points: 8.0,
        }
    }
}

/// Verdict thresholds and confidence curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub fake_min: f64,
    pub real_max: f64,
    pub trusted_real_max: f64,

    pub fake_base: f64,
    pub fake_slope: f64,
    pub fake_max_confidence: f64,

    pub trusted_real_base: f64,
    pub trusted_real_slope: f64,
    pub trusted_real_max_confidence: f64,

    pub real_base: f64,
    pub real_slope: f64,
    pub real_max_confidence: f64,

    pub doubtful_base: f64,
    pub doubtful_span: f64,
    pub doubtful_min_confidence: f64,
    pub doubtful_max_confidence: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            fake_min: 60.0,
            real_max: 15.0,
            trusted_real_max: 25.0,
            fake_base: 70.0,
            fake_slope: 0.75,
            fake_max_confidence: 95.0,
            trusted_real_base: 85.0,
            trusted_real_slope: 0.5,
            trusted_real_max_confidence: 95.0,
            real_base: 75.0,
            real_slope: 1.0,
            real_max_confidence: 90.0,
            doubtful_base: 50.0,
            doubtful_span: 10.0,
            doubtful_min_confidence: 50.0,
            doubtful_max_confidence: 65.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationConfig {
    pub max_keywords: usize,
    pub pattern_score_min: f64,
    pub max_pattern_findings: usize,
    pub max_source_findings: usize,
    pub negative_sentiment: f64,
    pub positive_sentiment: f64,
    pub readability_suspicion_min: f64,
    pub ml_labels: Vec<String>,
    pub ml_confidence_min: f64,
    pub max_similarity_matches: usize,
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self {
            max_keywords: 5,
            pattern_score_min: 30.0,
            max_pattern_findings: 2,
            max_source_findings: 1,
            negative_sentiment: -0.5,
            positive_sentiment: 0.7,
            readability_suspicion_min: 10.0,
            ml_labels: vec!["NEGATIVE".into(), "FAKE".into()],
            ml_confidence_min: 0.7,
            max_similarity_matches: 2,
        }
    }
}

impl ScoringConfig {
    /// Resolve the path from `DETECTOR_SCORING_PATH` (or the default) and load it.
    pub fn from_env() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_SCORING_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_SCORING_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// Load from a TOML file. A missing file yields the built-in defaults; a file that
    /// exists but does not parse or validate is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "scoring config not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read scoring config at {}", path.display())
                })
            }
        };
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid scoring config at {}", path.display()))
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: ScoringConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject threshold layouts that would make the verdict bands overlap or invert.
    pub fn validate(&self) -> anyhow::Result<()> {
        let t = &self.thresholds;
        if !(0.0 <= t.real_max && t.real_max <= t.trusted_real_max) {
            anyhow::bail!(
                "thresholds: expected 0 <= real_max ({}) <= trusted_real_max ({})",
                t.real_max,
                t.trusted_real_max
            );
        }
        if !(t.trusted_real_max < t.fake_min && t.fake_min <= 100.0) {
            anyhow::bail!(
                "thresholds: expected trusted_real_max ({}) < fake_min ({}) <= 100",
                t.trusted_real_max,
                t.fake_min
            );
        }
        if t.doubtful_min_confidence > t.doubtful_max_confidence {
            anyhow::bail!("thresholds: doubtful_min_confidence exceeds doubtful_max_confidence");
        }
        for (name, cap) in [
            ("lexical.cap", self.lexical.cap),
            ("patterns.cap", self.patterns.cap),
            ("similarity.cap", self.similarity.cap),
        ] {
            if !cap.is_finite() || cap < 0.0 {
                anyhow::bail!("{name} must be a non-negative number, got {cap}");
            }
        }
        Ok(())
    }
}
