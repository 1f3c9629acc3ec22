use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all charge notification metrics
const PREFIX: &str = "charge_notification";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Work Item Metrics
    pub static ref WORK_ITEMS_EXECUTED_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_work_items_executed_total"), "Work items executed by kind and outcome"),
        &["kind", "status"]
    ).expect("Failed to create work_items_executed_total metric");

    pub static ref WORK_ITEM_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_work_item_duration_seconds"),
            "Work item execution duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0, 60.0]),
        &["kind"]
    ).expect("Failed to create work_item_duration_seconds metric");

    pub static ref WORK_QUEUE_DEPTH: Gauge = Gauge::new(
        format!("{PREFIX}_work_queue_depth"),
        "Number of work items currently buffered in the queue"
    ).expect("Failed to create work_queue_depth metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(WORK_ITEMS_EXECUTED_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(WORK_ITEM_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(WORK_QUEUE_DEPTH.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record a finished work item execution
pub fn record_work_item_execution(kind: &str, status: &str, duration: Duration) {
    WORK_ITEMS_EXECUTED_TOTAL
        .with_label_values(&[kind, status])
        .inc();

    WORK_ITEM_DURATION_SECONDS
        .with_label_values(&[kind])
        .observe(duration.as_secs_f64());
}

/// Update the buffered queue depth
pub fn set_work_queue_depth(depth: usize) {
    WORK_QUEUE_DEPTH.set(depth as f64);
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
