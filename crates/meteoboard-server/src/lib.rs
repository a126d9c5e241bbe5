//! HTTP surface for the dashboard pipeline
//!
//! Serves the startup summary and per-request chart bundles to the
//! presentation layer. The dataset is loaded once, wrapped in the shared
//! state, and never mutated, so chart requests recompute statelessly and
//! concurrently without locking.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use opentelemetry::metrics::{Counter, MeterProvider};
use opentelemetry_prometheus::exporter;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::{Encoder, Registry, TextEncoder};
use serde::Deserialize;

use meteoboard_core::{
    build_charts, summarize, ChartBundle, Dataset, DatasetSummary, Granularity, TemperatureColumn,
};

pub struct AppState {
    ready: AtomicBool,
    registry: Registry,
    #[allow(dead_code)]
    provider: SdkMeterProvider,
    requests_total: Counter<u64>,
    dataset: Arc<Dataset>,
    summary: DatasetSummary,
}

/// Build the router and shared state around a loaded dataset.
///
/// The summary is folded here, once; chart handlers recompute their payloads
/// per request against the immutable dataset.
pub fn build_app(dataset: Dataset) -> (Router, Arc<AppState>) {
    // Prometheus exporter via OpenTelemetry
    let registry = Registry::new();
    let reader = exporter()
        .with_registry(registry.clone())
        .build()
        .expect("prom exporter");
    let provider = SdkMeterProvider::builder().with_reader(reader).build();
    let meter = provider.meter("meteoboard-server");

    let requests_total = meter
        .u64_counter("meteoboard_requests_total")
        .with_description("Total HTTP requests served")
        .init();

    let dataset_summary = summarize(&dataset);
    let state = Arc::new(AppState {
        ready: AtomicBool::new(false),
        registry,
        provider,
        requests_total,
        dataset: Arc::new(dataset),
        summary: dataset_summary,
    });

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1/summary", get(summary))
        .route("/api/v1/charts", get(charts))
        .with_state(Arc::clone(&state));

    (router, state)
}

pub fn set_ready(state: &Arc<AppState>, is_ready: bool) {
    state.ready.store(is_ready, Ordering::Relaxed);
}

async fn healthz(State(state): State<Arc<AppState>>) -> StatusCode {
    state.requests_total.add(1, &[]);
    StatusCode::OK
}

async fn readyz(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics(
    State(state): State<Arc<AppState>>,
) -> (
    [(axum::http::header::HeaderName, axum::http::HeaderValue); 1],
    String,
) {
    let encoder = TextEncoder::new();
    let metric_families = state.registry.gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        tracing::warn!(error=?e, "failed to encode metrics");
    }
    let body = String::from_utf8(buf).unwrap_or_default();
    let header = (
        header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    ([header], body)
}

async fn summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.requests_total.add(1, &[]);
    Json(state.summary.clone())
}

/// Control state from the presentation layer. Absent parameters fall back
/// to the dashboard defaults (daily, instantaneous temperature); unknown
/// values reject with 400.
#[derive(Debug, Deserialize)]
struct ChartQuery {
    #[serde(default)]
    granularity: Granularity,
    #[serde(default)]
    temperature: TemperatureColumn,
}

async fn charts(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ChartQuery>,
) -> Json<ChartBundle> {
    state.requests_total.add(1, &[]);
    Json(build_charts(&state.dataset, q.granularity, q.temperature))
}
