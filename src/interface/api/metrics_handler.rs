//! Prometheus metrics handler

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics exporter
pub fn init_metrics() -> PrometheusHandle {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install metrics recorder");

    describe_counter!("calls_initiated_total", "Total calls initiated");
    describe_counter!(
        "calls_completed_total",
        "Total calls terminated successfully"
    );
    describe_counter!("calls_failed_total", "Total call initiations that failed");
    describe_gauge!(
        "telephony_active_sessions",
        "Number of live provider sessions"
    );

    handle
}

/// HTTP metrics handler
pub async fn metrics_handler(
    axum::extract::State(prometheus_handle): axum::extract::State<PrometheusHandle>,
) -> Response {
    let metrics = prometheus_handle.render();
    (StatusCode::OK, metrics).into_response()
}

/// Record a successful call initiation
pub fn record_call_initiated() {
    counter!("calls_initiated_total").increment(1);
}

/// Record a successful call termination
pub fn record_call_completed() {
    counter!("calls_completed_total").increment(1);
}

/// Record a failed call initiation
pub fn record_call_failed(reason: &str) {
    counter!("calls_failed_total", "reason" => reason.to_string()).increment(1);
}

/// Update the live session gauge
pub fn update_active_sessions(count: usize) {
    gauge!("telephony_active_sessions").set(count as f64);
}
