//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tagged_log_dropped_lines_total` (counter): lines a handler failed to
//!   emit, labelled by `reason` (`encode`, `write`)
//! - `tagged_log_http_requests_total` (counter): requests seen by the demo
//!   server, labelled by `method` and `status`

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const DROPPED_LINES_TOTAL: &str = "tagged_log_dropped_lines_total";
pub const HTTP_REQUESTS_TOTAL: &str = "tagged_log_http_requests_total";

/// Install the Prometheus recorder and its HTTP listener on `addr`.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics recorder"),
    }
}

/// Count a line a handler could not emit.
pub fn record_dropped_line(reason: &'static str) {
    ::metrics::counter!(DROPPED_LINES_TOTAL, "reason" => reason).increment(1);
}

/// Count a request served by the demo server.
pub fn record_request(method: &str, status: u16) {
    ::metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
