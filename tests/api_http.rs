// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health (with and without an ML classifier)
// - POST /predict (happy path, short text, 400s)
// - GET /metrics (counters and the ML gauge)
// - 500 on an internal fault
// - CORS headers
//
// The Prometheus recorder is process-wide, so tests that build app state run serially.

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use serde_json::Value as Json;
use serial_test::serial;
use tower::ServiceExt as _; // for `oneshot`

use fake_news_detector::analyze::fact_check::{FactCheckResult, FactChecker};
use fake_news_detector::analyze::ml_adapter::{MlAdapter, MockClassifier};
use fake_news_detector::{api, AppState, Detector};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

const FAKE_TEXT: &str = "URGENT! WIN CASH NOW! Guaranteed $1000 daily income with ZERO investment! \
This exclusive offer is available for LIMITED TIME ONLY! Act now! Free money waiting for you!";

fn test_router() -> Router {
    api::router(AppState::new(Detector::default()))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Json) {
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v: Json = serde_json::from_slice(&bytes).expect("json body");
    (status, v)
}

async fn metrics_text(app: Router) -> String {
    let req = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

struct PanickingChecker;

impl FactChecker for PanickingChecker {
    fn check(&self, _text: &str, _url: Option<&str>) -> FactCheckResult {
        panic!("fact-check backend exploded");
    }
}

fn post_json(uri: &str, payload: &Json) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST")
}

#[tokio::test]
#[serial]
async fn health_reports_service_and_ml_status() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let (status, v) = send(test_router(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "ok");
    assert_eq!(v["service"], "fake-news-detector");
    assert_eq!(v["ml_models"], "unavailable");
    assert!(v["ml_provider"].is_null());
}

#[tokio::test]
#[serial]
async fn health_shows_loaded_classifier() {
    let ml = MlAdapter::with_classifier(Arc::new(MockClassifier), 2048);
    let app = api::router(AppState::new(Detector::default().with_ml(Arc::new(ml))));

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (_, v) = send(app, req).await;
    assert_eq!(v["ml_models"], "available");
    assert_eq!(v["ml_provider"], "mock");
}

#[tokio::test]
#[serial]
async fn predict_returns_full_report() {
    let payload = json!({ "text": FAKE_TEXT, "url": "https://get-rich-quick.com" });
    let (status, v) = send(test_router(), post_json("/predict", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["result"], "Fake");
    assert!(v["confidence"].as_f64().unwrap() >= 70.0);
    assert_eq!(v["source_credibility"], "medium");
    assert!(v["explanation"]
        .as_str()
        .unwrap()
        .starts_with("Found 7 suspicious keyword(s): free money, win cash"));

    let d = &v["details"];
    for key in [
        "keyword_count",
        "matched_keywords",
        "pattern_score",
        "pattern_findings",
        "source_reliability",
        "source_findings",
        "sentiment",
        "readability",
        "ml_classification",
        "fact_check",
        "similarity_check",
        "score_breakdown",
        "final_score",
    ] {
        assert!(d.get(key).is_some(), "missing details.{key}");
    }
    assert_eq!(d["keyword_count"], 7);
    assert!(d["ml_classification"].is_null());
    assert_eq!(d["score_breakdown"][0]["signal"], "lexical");
    assert_eq!(d["score_breakdown"][0]["points"], 45.0);
}

#[tokio::test]
#[serial]
async fn short_text_gets_fixed_doubtful_with_empty_details() {
    let payload = json!({ "text": "  hi there ", "url": "https://www.bbc.com/news" });
    let (status, v) = send(test_router(), post_json("/predict", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        v,
        json!({
            "result": "Doubtful",
            "confidence": 50.0,
            "explanation": "Text is too short to analyze properly",
            "source_credibility": "medium",
            "details": {},
        })
    );
}

#[tokio::test]
#[serial]
async fn missing_body_is_400() {
    let req = Request::builder()
        .method("POST")
        .uri("/predict")
        .body(Body::empty())
        .unwrap();
    let (status, v) = send(test_router(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v, json!({ "error": "No data provided" }));
}

#[tokio::test]
#[serial]
async fn malformed_json_is_400() {
    let req = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();
    let (status, v) = send(test_router(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "No data provided");
}

#[tokio::test]
#[serial]
async fn missing_or_empty_text_is_400() {
    for payload in [
        json!({ "url": "https://example.com" }),
        json!({ "text": "" }),
        json!({ "text": null }),
    ] {
        let (status, v) = send(test_router(), post_json("/predict", &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(v["error"], "Text is required");
    }
}

#[tokio::test]
#[serial]
async fn metrics_exposes_detector_counters() {
    let app = test_router();
    let payload = json!({ "text": "The library extended its weekend opening hours this month." });
    let (status, _) = send(app.clone(), post_json("/predict", &payload)).await;
    assert_eq!(status, StatusCode::OK);

    let text = metrics_text(app).await;
    assert!(
        text.contains("detector_requests_total"),
        "metrics body was: {text}"
    );
}

#[tokio::test]
#[serial]
async fn metrics_gauge_tracks_injected_classifier() {
    let ml = MlAdapter::with_classifier(Arc::new(MockClassifier), 2048);
    let app = api::router(AppState::new(Detector::default().with_ml(Arc::new(ml))));
    let text = metrics_text(app).await;
    assert!(text.contains("detector_ml_loaded 1"), "metrics body was: {text}");

    let text = metrics_text(test_router()).await;
    assert!(text.contains("detector_ml_loaded 0"), "metrics body was: {text}");
}

#[tokio::test]
#[serial]
async fn internal_fault_is_500_with_message() {
    let detector = Detector::default().with_fact_checker(Arc::new(PanickingChecker));
    let app = api::router(AppState::new(detector));

    let (status, v) = send(app, post_json("/predict", &json!({ "text": FAKE_TEXT }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let msg = v["error"].as_str().expect("error string");
    assert!(!msg.is_empty());
    assert!(v.get("result").is_none());
}

#[tokio::test]
#[serial]
async fn cors_mirrors_origin() {
    let req = Request::builder()
        .uri("/health")
        .header("origin", "http://example.com")
        .body(Body::empty())
        .unwrap();
    let resp = test_router().oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|h| h.to_str().ok()),
        Some("http://example.com")
    );
}
