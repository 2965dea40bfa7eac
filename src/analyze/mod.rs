// src/analyze/mod.rs
//! Analysis pipeline entry: collects every signal, fuses them and builds the report.

pub mod fact_check;
pub mod lexical;
pub mod ml_adapter;
pub mod patterns;
pub mod phrases;
pub mod readability;
pub mod similarity;
pub mod source;
pub mod text;

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::decision::DetectionReport;
use crate::engine::{classify, fuse, Signals};
use crate::explain::compose;
use crate::sentiment::{analyze_sentiment, LexiconSentiment, PolarityAnalyzer};

// Re-export convenient types.
pub use crate::analyze::fact_check::{ClaimPhraseChecker, FactCheckResult, FactChecker};
pub use crate::analyze::ml_adapter::{build_ml_adapter, MlAdapter, MlPrediction, TextClassifier};
pub use crate::analyze::readability::{FleschReadability, ReadabilityProvider};
pub use crate::analyze::similarity::{KnownPatternMatcher, SimilarityChecker};
pub use crate::analyze::source::DomainLists;
pub use crate::analyze::text::{PunctSentenceTokenizer, SentenceTokenizer};

/// The credibility engine. Immutable after construction and shared across requests.
///
/// Collaborators are injected; `None` for an optional one means "unavailable" and the
/// matching signal takes its neutral default.
pub struct Detector {
    cfg: Arc<ScoringConfig>,
    domains: DomainLists,
    tokenizer: Option<Arc<dyn SentenceTokenizer>>,
    sentiment: Option<Arc<dyn PolarityAnalyzer>>,
    readability: Option<Arc<dyn ReadabilityProvider>>,
    ml: Arc<MlAdapter>,
    fact_checker: Arc<dyn FactChecker>,
    similarity: Arc<dyn SimilarityChecker>,
}

impl Detector {
    /// Built-in collaborators everywhere, ML disabled.
    pub fn new(cfg: ScoringConfig) -> Self {
        let tokenizer: Arc<dyn SentenceTokenizer> = Arc::new(PunctSentenceTokenizer);
        let similarity = KnownPatternMatcher::new(&cfg.similarity);
        Self {
            cfg: Arc::new(cfg),
            domains: DomainLists::default(),
            readability: Some(Arc::new(FleschReadability::new(tokenizer.clone()))),
            tokenizer: Some(tokenizer),
            sentiment: Some(Arc::new(LexiconSentiment::new())),
            ml: Arc::new(MlAdapter::disabled()),
            fact_checker: Arc::new(ClaimPhraseChecker::default()),
            similarity: Arc::new(similarity),
        }
    }

    /// Detector with no optional NLP collaborators: fallback sentence count, zero
    /// sentiment, neutral readability, no ML.
    pub fn bare(cfg: ScoringConfig) -> Self {
        Self::new(cfg)
            .with_tokenizer(None)
            .with_sentiment(None)
            .with_readability(None)
    }

    pub fn with_ml(mut self, ml: Arc<MlAdapter>) -> Self {
        self.ml = ml;
        self
    }

    pub fn with_tokenizer(mut self, t: Option<Arc<dyn SentenceTokenizer>>) -> Self {
        self.tokenizer = t;
        self
    }

    pub fn with_sentiment(mut self, s: Option<Arc<dyn PolarityAnalyzer>>) -> Self {
        self.sentiment = s;
        self
    }

    pub fn with_readability(mut self, r: Option<Arc<dyn ReadabilityProvider>>) -> Self {
        self.readability = r;
        self
    }

    pub fn with_fact_checker(mut self, f: Arc<dyn FactChecker>) -> Self {
        self.fact_checker = f;
        self
    }

    pub fn with_similarity(mut self, s: Arc<dyn SimilarityChecker>) -> Self {
        self.similarity = s;
        self
    }

    pub fn with_domains(mut self, d: DomainLists) -> Self {
        self.domains = d;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.cfg
    }

    pub fn ml(&self) -> &MlAdapter {
        &self.ml
    }

    /// Whether the ML classifier is loaded (does not trigger loading).
    pub fn ml_loaded(&self) -> bool {
        self.ml.is_loaded()
    }

    /// Run every analyzer over `(text, url)`. No analyzer depends on another.
    pub fn collect_signals(&self, text: &str, url: Option<&str>) -> Signals {
        Signals {
            lexical: lexical::detect_phrases(text, phrases::SUSPICIOUS_PHRASES),
            patterns: patterns::analyze_patterns(
                text,
                self.tokenizer.as_deref(),
                &self.cfg.patterns,
            ),
            source: source::classify_source(url, &self.domains),
            sentiment: analyze_sentiment(self.sentiment.as_deref(), text),
            readability: readability::analyze_readability(
                self.readability.as_deref(),
                text,
                &self.cfg.readability,
            ),
            ml: self.ml.classify(text),
            fact_check: self.fact_checker.check(text, url),
            similarity: self.similarity.check(text),
        }
    }

    /// Score `text` (optionally with its source `url`). Never fails.
    pub fn detect(&self, text: &str, url: Option<&str>) -> DetectionReport {
        let started = Instant::now();
        let id = anon_hash(text);

        if text.trim().chars().count() < self.cfg.input.min_chars {
            debug!(%id, "text too short; returning fixed doubtful verdict");
            return DetectionReport::insufficient_text();
        }

        let signals = self.collect_signals(text, url);
        let fused = fuse(&signals, &self.cfg);
        let (verdict, confidence) = classify(fused.value, signals.source.tier, &self.cfg.thresholds);
        let explanation = compose(&signals, &self.cfg.explanation);

        debug!(
            %id,
            verdict = verdict.as_str(),
            score = fused.value,
            confidence,
            keywords = signals.lexical.count,
            pattern_score = signals.patterns.score,
            tier = ?signals.source.tier,
            ml = signals.ml.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "detection complete"
        );

        DetectionReport::from_signals(verdict, confidence, explanation, signals, fused)
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Short, non-reversible identifier for log lines; raw text is never logged.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
