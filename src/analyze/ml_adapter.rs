//! ML classifier adapter: optional capability with lazy, once-only initialization.
//!
//! The adapter owns a factory and a `OnceLock` slot. The first `classify` call runs the
//! factory; the outcome (classifier or failure) is stored and never retried. Concurrent
//! first calls block on the same initialization instead of racing.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{info, warn};

use super::text::truncate_chars;
use crate::config::MlConfig;
use crate::error::SignalError;

/// Top label/score pair returned by a classifier. `score` is in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlPrediction {
    pub label: String,
    pub score: f64,
}

pub trait TextClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<MlPrediction, SignalError>;
    /// Provider name for diagnostics/health.
    fn name(&self) -> &'static str;
}

type ClassifierFactory = Box<dyn Fn() -> Result<Arc<dyn TextClassifier>, SignalError> + Send + Sync>;

pub struct MlAdapter {
    factory: Option<ClassifierFactory>,
    slot: OnceLock<Option<Arc<dyn TextClassifier>>>,
    max_chars: usize,
}

impl std::fmt::Debug for MlAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MlAdapter")
            .field("configured", &self.factory.is_some())
            .field("initialized", &self.slot.get().is_some())
            .field("max_chars", &self.max_chars)
            .finish()
    }
}

pub const DEFAULT_MAX_INPUT_CHARS: usize = 2048;

impl MlAdapter {
    /// Null adapter: never loads, never classifies.
    pub fn disabled() -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(None);
        Self {
            factory: None,
            slot,
            max_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    /// Adapter around an already constructed classifier.
    pub fn with_classifier(classifier: Arc<dyn TextClassifier>, max_chars: usize) -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(Some(classifier));
        Self {
            factory: None,
            slot,
            max_chars,
        }
    }

    /// Adapter that builds its classifier on first use.
    pub fn lazy<F>(factory: F, max_chars: usize) -> Self
    where
        F: Fn() -> Result<Arc<dyn TextClassifier>, SignalError> + Send + Sync + 'static,
    {
        Self {
            factory: Some(Box::new(factory)),
            slot: OnceLock::new(),
            max_chars,
        }
    }

    fn classifier(&self) -> Option<&Arc<dyn TextClassifier>> {
        self.slot
            .get_or_init(|| {
                let factory = self.factory.as_ref()?;
                match factory() {
                    Ok(c) => {
                        info!(provider = c.name(), "ML classifier loaded");
                        crate::metrics::set_ml_loaded(true);
                        Some(c)
                    }
                    Err(e) => {
                        warn!(error = %e, "ML classifier unavailable; continuing without it");
                        crate::metrics::set_ml_loaded(false);
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Top prediction for the (truncated) text, or `None` when unavailable or failing.
    pub fn classify(&self, text: &str) -> Option<MlPrediction> {
        let classifier = self.classifier()?;
        let input = truncate_chars(text, self.max_chars);
        match classifier.classify(input) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!(error = %e, provider = classifier.name(), "ML classification failed");
                None
            }
        }
    }

    /// Forces initialization; returns whether a classifier is available.
    pub fn warm_up(&self) -> bool {
        self.classifier().is_some()
    }

    /// True only after a successful initialization. Never triggers one.
    pub fn is_loaded(&self) -> bool {
        matches!(self.slot.get(), Some(Some(_)))
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        match self.slot.get() {
            Some(Some(c)) => Some(c.name()),
            _ => None,
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}

impl Default for MlAdapter {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Build the adapter from config and environment.
///
/// * `ML_TEST_MODE=mock` → deterministic mock classifier.
/// * `enabled == false` → null adapter.
/// * `provider == "huggingface"` → lazy HTTP classifier.
/// * `provider == "mock"` → mock classifier.
pub fn build_ml_adapter(cfg: &MlConfig) -> MlAdapter {
    if std::env::var("ML_TEST_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        return MlAdapter::with_classifier(Arc::new(MockClassifier), cfg.max_input_chars);
    }

    if !cfg.enabled {
        return MlAdapter::disabled();
    }

    match cfg.provider.as_str() {
        "huggingface" => {
            let max_chars = cfg.max_input_chars;
            let cfg = cfg.clone();
            MlAdapter::lazy(
                move || {
                    let c = HttpClassifier::from_config(&cfg)?;
                    Ok(Arc::new(c) as Arc<dyn TextClassifier>)
                },
                max_chars,
            )
        }
        "mock" => MlAdapter::with_classifier(Arc::new(MockClassifier), cfg.max_input_chars),
        other => {
            warn!(provider = other, "unknown ML provider; classifier disabled");
            MlAdapter::disabled()
        }
    }
}

// ------------------------------------------------------------
// Classifiers
// ------------------------------------------------------------

/// Hugging Face inference API text classification (blocking client; callers run the
/// detector off the async runtime).
pub struct HttpClassifier {
    http: reqwest::blocking::Client,
    url: String,
    token: String,
}

impl HttpClassifier {
    pub fn from_config(cfg: &MlConfig) -> Result<Self, SignalError> {
        if cfg.api_token.trim().is_empty() {
            return Err(SignalError::Init("missing inference API token".into()));
        }
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("fake-news-detector/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| SignalError::Init(e.to_string()))?;
        Ok(Self {
            http,
            url: cfg.inference_url(),
            token: cfg.api_token.clone(),
        })
    }
}

#[derive(Serialize)]
struct InferenceReq<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResp {
    Nested(Vec<Vec<MlPrediction>>),
    Flat(Vec<MlPrediction>),
}

impl InferenceResp {
    fn top(self) -> Option<MlPrediction> {
        let preds = match self {
            InferenceResp::Nested(v) => v.into_iter().next().unwrap_or_default(),
            InferenceResp::Flat(v) => v,
        };
        preds
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

impl TextClassifier for HttpClassifier {
    fn classify(&self, text: &str) -> Result<MlPrediction, SignalError> {
        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&InferenceReq {
                inputs: text,
                options: InferenceOptions {
                    wait_for_model: true,
                },
            })
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SignalError::Response(format!("status {status}")));
        }
        let body: InferenceResp = resp.json()?;
        body.top()
            .ok_or_else(|| SignalError::Response("empty prediction list".into()))
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }
}

/// Deterministic neutral classifier used in test mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockClassifier;

impl TextClassifier for MockClassifier {
    fn classify(&self, _text: &str) -> Result<MlPrediction, SignalError> {
        Ok(MlPrediction {
            label: "NEUTRAL".into(),
            score: 0.5,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Always returns the same prediction.
#[derive(Debug, Clone)]
pub struct StaticClassifier {
    pub prediction: MlPrediction,
}

impl StaticClassifier {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            prediction: MlPrediction {
                label: label.into(),
                score,
            },
        }
    }
}

impl TextClassifier for StaticClassifier {
    fn classify(&self, _text: &str) -> Result<MlPrediction, SignalError> {
        Ok(self.prediction.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
