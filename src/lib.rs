// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod explain;
pub mod metrics;
pub mod ml_bootstrap;
pub mod sentiment;

// Signal producers + `Detector` pipeline entry
pub mod analyze;

// ---- Re-exports for stable public API ----
pub use crate::analyze::Detector;
pub use crate::api::{router, AppState};
pub use crate::config::ScoringConfig;
pub use crate::decision::{DetectionReport, SourceTier, Verdict};

use std::sync::Arc;
use tracing::{info, warn};

/// Build the full HTTP app from environment-selected configuration.
///
/// The ML classifier (if enabled) is loaded in the background so startup never waits on a
/// model download; requests arriving first simply trigger or wait for the same one-time load.
pub async fn app() -> anyhow::Result<axum::Router> {
    let state = AppState::from_env()?;
    let detector = Arc::clone(&state.detector);
    tokio::task::spawn_blocking(move || {
        if detector.ml().warm_up() {
            info!(provider = ?detector.ml().provider_name(), "ML classifier ready");
        } else {
            warn!("running without ML classifier");
        }
    });
    Ok(router(state))
}

/// One-off smoke test of the configured ML classifier. Never panics; logs the result.
pub async fn run_ml_quick_probe() -> anyhow::Result<()> {
    let path = std::env::var(config::ml::ENV_ML_CONFIG_PATH)
        .unwrap_or_else(|_| config::ml::DEFAULT_ML_CONFIG_PATH.to_string());
    let rt = ml_bootstrap::MlRuntime::from_path(&path)?;
    let ok = tokio::task::spawn_blocking(move || rt.quick_probe()).await?;
    info!(ok, "ML quick probe finished");
    Ok(())
}
