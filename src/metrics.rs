use axum::{routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

use crate::decision::Verdict;

static HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: Option<PrometheusHandle>,
}

impl Metrics {
    /// Install the Prometheus recorder once per process. Later calls reuse the same handle.
    /// If another recorder is already installed, metrics are still emitted to it and
    /// `/metrics` renders nothing.
    pub fn init() -> Self {
        let handle = HANDLE
            .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
                Ok(h) => Some(h),
                Err(e) => {
                    tracing::warn!(error = %e, "prometheus recorder not installed");
                    None
                }
            })
            .clone();
        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.map(|h| h.render()).unwrap_or_default() }
            }),
        )
    }
}

pub fn record_detection(verdict: Verdict, elapsed_ms: f64) {
    counter!("detector_requests_total", "verdict" => verdict.as_str()).increment(1);
    histogram!("detector_duration_ms").record(elapsed_ms);
}

pub fn record_rejection(reason: &'static str) {
    counter!("detector_rejected_total", "reason" => reason).increment(1);
}

pub fn set_ml_loaded(loaded: bool) {
    gauge!("detector_ml_loaded").set(if loaded { 1.0 } else { 0.0 });
}
