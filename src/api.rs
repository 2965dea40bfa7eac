use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::analyze::{build_ml_adapter, Detector};
use crate::config::{MlConfig, ScoringConfig};
use crate::decision::DetectionReport;
use crate::metrics::{record_detection, record_rejection, set_ml_loaded, Metrics};

pub const SERVICE_NAME: &str = "fake-news-detector";

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<Detector>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(detector: Detector) -> Self {
        let metrics = Metrics::init();
        set_ml_loaded(detector.ml_loaded());
        Self {
            detector: Arc::new(detector),
            metrics,
        }
    }

    /// Scoring config + ML config from their env-selected paths.
    pub fn from_env() -> anyhow::Result<Self> {
        let scoring = ScoringConfig::from_env()?;
        let ml_cfg = MlConfig::from_env()?;
        info!(
            ml_enabled = ml_cfg.enabled,
            ml_provider = %ml_cfg.provider,
            "detector configuration loaded"
        );
        let ml = build_ml_adapter(&ml_cfg);
        let detector = Detector::new(scoring).with_ml(Arc::new(ml));
        Ok(Self::new(detector))
    }
}

pub fn router(state: AppState) -> Router {
    let metrics = state.metrics.router();
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(state)
        .merge(metrics)
        .layer(CorsLayer::very_permissive())
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let ml = state.detector.ml();
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "ml_models": if ml.is_loaded() { "available" } else { "unavailable" },
        "ml_provider": ml.provider_name(),
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyError {
    NoData,
    NoText,
}

impl BodyError {
    fn reason(self) -> &'static str {
        match self {
            BodyError::NoData => "missing_body",
            BodyError::NoText => "missing_text",
        }
    }
}

impl From<BodyError> for ApiError {
    fn from(e: BodyError) -> Self {
        match e {
            BodyError::NoData => ApiError::BadRequest("No data provided".into()),
            BodyError::NoText => ApiError::BadRequest("Text is required".into()),
        }
    }
}

/// Pull `{text, url?}` out of the body. An absent, unparseable, `null` or empty-object
/// body counts as no data.
fn parse_predict_body(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(String, Option<String>), BodyError> {
    let Ok(Json(value)) = body else {
        return Err(BodyError::NoData);
    };
    let obj = match value.as_object() {
        Some(o) if !o.is_empty() => o,
        _ => return Err(BodyError::NoData),
    };
    let text = match obj.get("text").and_then(Value::as_str) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => return Err(BodyError::NoText),
    };
    let url = obj
        .get("url")
        .and_then(Value::as_str)
        .filter(|u| !u.trim().is_empty())
        .map(str::to_string);
    Ok((text, url))
}

async fn predict(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DetectionReport>, ApiError> {
    let (text, url) = parse_predict_body(body).inspect_err(|e| record_rejection(e.reason()))?;

    let started = Instant::now();
    let detector = state.detector.clone();
    let report = tokio::task::spawn_blocking(move || detector.detect(&text, url.as_deref()))
        .await
        .map_err(|e| {
            error!(error = %e, "detection task failed");
            ApiError::Internal(e.to_string())
        })?;

    record_detection(report.verdict, started.elapsed().as_secs_f64() * 1000.0);
    Ok(Json(report))
}
