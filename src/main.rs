//! Fake-news detector binary entrypoint
//! Boots the Axum HTTP server with the detector, health check and metrics routes.
//!
//! See `README.md` for quickstart and configuration.

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over the default filter; `LOG_FORMAT=json`
/// switches to structured output. If the host runtime already installed one, keep it.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fake_news_detector=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    if std::env::var("ML_QUICK_PROBE").is_ok_and(|v| v == "1") {
        if let Err(e) = fake_news_detector::run_ml_quick_probe().await {
            tracing::warn!(error = ?e, "ML quick probe didn't run");
        }
    }

    let router = fake_news_detector::app().await?;

    Ok(router.into())
}
