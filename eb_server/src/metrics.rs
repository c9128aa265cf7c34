//! Prometheus metrics for monitoring the bracket service.
//!
//! Metrics are exposed in Prometheus text format on a dedicated listener,
//! enabled by setting `EB_METRICS_BIND`. HTTP metrics are recorded by the
//! request-id middleware; bracket lifecycle counters by the API handlers.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use eb_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::http_requests_total("POST", "/api/v1/brackets", 200);
//! metrics::brackets_created_total("CS2");
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize the Prometheus metrics exporter.
///
/// Sets up a Prometheus scrape endpoint on the specified address.
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record an HTTP request with method, path, and status labels.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Bracket Metrics
// ============================================================================

/// Increment the created-brackets counter for a game.
pub fn brackets_created_total(game: &str) {
    metrics::counter!("brackets_created_total",
        "game" => game.to_string()
    )
    .increment(1);
}

/// Increment the generated-brackets counter for a format.
pub fn brackets_generated_total(format: &str) {
    metrics::counter!("brackets_generated_total",
        "format" => format.to_string()
    )
    .increment(1);
}

/// Increment the submitted-results counter; outcome is `decided` or `tied`.
pub fn results_submitted_total(outcome: &str) {
    metrics::counter!("results_submitted_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Increment the completed-brackets counter.
pub fn brackets_completed_total() {
    metrics::counter!("brackets_completed_total").increment(1);
}
