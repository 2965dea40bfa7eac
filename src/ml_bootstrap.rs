// src/ml_bootstrap.rs
use crate::analyze::ml_adapter::{build_ml_adapter, MlAdapter};
use crate::config::MlConfig;
use std::sync::Arc;
use tracing::{info, warn};

pub struct MlRuntime {
    pub cfg: MlConfig,
    pub adapter: Arc<MlAdapter>,
}

impl MlRuntime {
    pub fn from_config(cfg: MlConfig) -> Self {
        // Safe diagnostics: provider + model + enabled + token length only
        info!(
            "ML cfg loaded: provider={}, model={}, enabled={}, token_len={}",
            cfg.provider,
            cfg.model,
            cfg.enabled,
            cfg.api_token.len()
        );
        let adapter = Arc::new(build_ml_adapter(&cfg));
        Self { cfg, adapter }
    }

    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        Ok(Self::from_config(MlConfig::load_from_file(path)?))
    }

    /// Loads the classifier (if configured) and classifies a fixed sample. Blocking.
    pub fn quick_probe(&self) -> bool {
        if !self.adapter.warm_up() {
            warn!("ML quick_probe skipped: classifier unavailable");
            return false;
        }
        let sample = "Scientists at the university published new findings on regional rainfall.";
        let out = self.adapter.classify(sample);
        info!("ML quick_probe => {:?}", out);
        out.is_some()
    }
}
