// src/config/ml.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, io, path::Path};
use tracing::{info, warn};

pub const DEFAULT_ML_CONFIG_PATH: &str = "config/ml.json";
pub const ENV_ML_CONFIG_PATH: &str = "DETECTOR_ML_CONFIG_PATH";
pub const ENV_HF_API_TOKEN: &str = "HF_API_TOKEN";

fn default_provider() -> String {
    "huggingface".to_string()
}
fn default_model() -> String {
    "distilbert-base-uncased-finetuned-sst-2-english".to_string()
}
fn default_max_input_chars() -> usize {
    // ~512 tokens at ~4 chars/token
    2048
}
fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlConfig {
    pub enabled: bool,
    /// "huggingface" | "mock" (case-insensitive)
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Full inference URL; defaults to the hosted inference API for `model`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// "ENV" means: read from HF_API_TOKEN
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MlConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_provider(),
            model: default_model(),
            endpoint: None,
            api_token: String::new(),
            max_input_chars: default_max_input_chars(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MlConfig {
    /// Resolve the path from `DETECTOR_ML_CONFIG_PATH` (or the default) and load it.
    pub fn from_env() -> anyhow::Result<Self> {
        let path = env::var(ENV_ML_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_ML_CONFIG_PATH.into());
        Self::load_from_file(path)
    }

    /// Missing file → disabled adapter. Unparseable file → error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "ML config not found, classifier disabled");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let mut cfg: MlConfig = serde_json::from_str(&data)?;

        cfg.provider = cfg.provider.trim().to_lowercase();

        // A missing token is not fatal here: the classifier fails its one-time init and the
        // detector runs without the ML signal.
        if cfg.api_token.trim().eq_ignore_ascii_case("env") {
            cfg.api_token = env::var(ENV_HF_API_TOKEN).unwrap_or_else(|_| {
                warn!("{ENV_HF_API_TOKEN} is not set; ML classifier will stay unavailable");
                String::new()
            });
        }

        if cfg.max_input_chars == 0 {
            cfg.max_input_chars = default_max_input_chars();
        }
        if cfg.timeout_secs == 0 {
            cfg.timeout_secs = default_timeout_secs();
        }

        Ok(cfg)
    }

    pub fn inference_url(&self) -> String {
        self.endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://api-inference.huggingface.co/models/{}",
                self.model
            )
        })
    }
}
