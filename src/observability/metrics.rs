//! Metrics collection and exposition.
//!
//! # Metrics
//! - `repositories_api_requests_total` (counter): requests by method, status
//! - `repositories_api_request_duration_seconds` (histogram): latency by method
//! - `repositories_api_repositories` (gauge): records currently in the store

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "repositories_api_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "repositories_api_request_duration_seconds";
pub const REPOSITORIES: &str = "repositories_api_repositories";

/// Install the Prometheus recorder and its scrape listener.
///
/// Needs a running Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request. `None` status means the request was dropped
/// before a response was produced.
pub fn record_request(method: &str, status: Option<StatusCode>, elapsed: Duration) {
    let status = status
        .map(|s| s.as_u16().to_string())
        .unwrap_or_else(|| "aborted".to_string());

    counter!(REQUESTS_TOTAL, "method" => method.to_string(), "status" => status).increment(1);
    histogram!(REQUEST_DURATION_SECONDS, "method" => method.to_string())
        .record(elapsed.as_secs_f64());
}

pub fn set_repository_count(count: usize) {
    gauge!(REPOSITORIES).set(count as f64);
}
