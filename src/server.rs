//! HTTP Server and Poll Loop
//!
//! This module implements the Prometheus exporter HTTP server and the modem poll loop.
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing `/metrics`, `/health`, and `/` endpoints
//! - **Poll Loop**: Background task that periodically reads the modem pages and updates metrics
//! - **State Management**: Shared state (config, metrics, client) using Arc for thread-safety
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /health` - Health check (returns 200 if the last poll succeeded, 503 otherwise)
//!
//! # Poll Loop
//!
//! Polling runs on its own schedule, independent of scrapes. Each cycle reads the
//! status page, then the signal page, then sleeps for the rest of
//! `refresh_rate_seconds`, but at least `min_sleep_seconds` (never under 5 seconds).
//!
//! # Error Handling
//!
//! A failed cycle is logged and the loop carries on; metrics stay at their last known
//! values until a later cycle succeeds. The loop has no shutdown path of its own and
//! ends with the process.

use crate::collectors::{self, CollectionContext, PollOutcome};
use crate::config::Config;
use crate::metrics::MetricsCollector;
use crate::surfboard::ModemClient;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::{sleep, Instant};
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    config: Config,
    metrics: MetricsCollector,
    client: Arc<ModemClient>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let metrics = MetricsCollector::new()?;
        let client = Arc::new(ModemClient::new(config.modem.clone())?);
        Ok(Self {
            config,
            metrics,
            client,
        })
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Run a single poll cycle against the modem
    pub async fn poll_once(&self) -> PollOutcome {
        let ctx = CollectionContext {
            client: &self.client,
            metrics: &self.metrics,
        };
        collectors::poll_once(&ctx).await
    }
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let state = AppState::new(config.clone())?;

    info!("Polling status page at {}", state.client.status_url());
    info!("Polling signal page at {}", state.client.signal_url());

    // Start background polling
    let poll_state = state.clone();
    tokio::spawn(async move {
        poll_loop(poll_state).await;
    });

    let app = router(state);

    // Start the server
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = bind(&addr).await?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Binds the metrics listener
pub async fn bind(addr: &str) -> crate::error::Result<TcpListener> {
    Ok(TcpListener::bind(addr).await?)
}

/// Routes served by the exporter
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn poll_loop(state: AppState) {
    let refresh_rate = state.config.metrics.refresh_rate();
    let floor = state.config.metrics.min_sleep();

    loop {
        let started = Instant::now();
        state.poll_once().await;
        sleep(collectors::next_sleep(refresh_rate, started.elapsed(), floor)).await;
    }
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Html(
        r#"<html>
<head><title>SURFboard Exporter</title></head>
<body>
<h1>SURFboard Prometheus Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(metrics) => metrics.into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let up_value = state.metrics.up.get();

    if up_value > 0.0 {
        (axum::http::StatusCode::OK, "OK")
    } else {
        (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            "Modem unreachable",
        )
    }
}
