//! Metrics collection and exposition.
//!
//! # Metrics
//! - `validation_requests_total` (counter): requests by endpoint, outcome
//! - `validation_request_duration_seconds` (histogram): latency by endpoint
//! - `validation_downstream_failures_total` (counter): fallbacks by reason

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(endpoint: &'static str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "validation_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!(
        "validation_request_duration_seconds",
        "endpoint" => endpoint
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a calculate request that fell back to the storage check.
pub fn record_downstream_failure(reason: &'static str) {
    ::metrics::counter!("validation_downstream_failures_total", "reason" => reason).increment(1);
}
