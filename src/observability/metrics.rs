//! Metrics collection and exposition.
//!
//! # Metrics
//! - `invocations_total` (counter): requests by method, route, status
//! - `invocation_duration_seconds` (histogram): pipeline latency by route
//! - `invocation_auth_failures_total` (counter): rejected tokens by route
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; a no-op until a
//!   recorder is installed
//! - Prometheus exporter only started when enabled in config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed invocation request.
pub fn record_invocation(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "invocations_total",
        "method" => method.to_owned(),
        "route" => route.to_owned(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("invocation_duration_seconds", "route" => route.to_owned())
        .record(start.elapsed().as_secs_f64());
}

/// Record a request rejected by the authenticator.
pub fn record_auth_failure(route: &str) {
    metrics::counter!("invocation_auth_failures_total", "route" => route.to_owned()).increment(1);
}
