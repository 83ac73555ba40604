//! Request timing log.
//!
//! Each request is keyed `"[METHOD] path"` (query string included). A debug
//! event marks the start; the finish event is emitted when the timer guard
//! drops, so it also fires when the request future is cancelled or a
//! handler panics.

use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

/// Log key for a request, e.g. `[POST] /repositories`.
pub fn request_key(method: &Method, path_and_query: &str) -> String {
    format!("[{}] {}", method, path_and_query)
}

struct RequestTimer {
    key: String,
    method: Method,
    request_id: String,
    started: Instant,
    status: Option<StatusCode>,
}

impl RequestTimer {
    fn start(request: &Request) -> Self {
        let method = request.method().clone();
        let path = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| request.uri().path());
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        let key = request_key(&method, path);
        tracing::debug!(request_id = %request_id, "{}", key);

        Self {
            key,
            method,
            request_id,
            started: Instant::now(),
            status: None,
        }
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        let elapsed_ms = millis(elapsed);

        match self.status {
            Some(status) => tracing::info!(
                request_id = %self.request_id,
                status = status.as_u16(),
                elapsed_ms,
                "{}: {:.3}ms",
                self.key,
                elapsed_ms
            ),
            None => tracing::warn!(
                request_id = %self.request_id,
                elapsed_ms,
                "{}: aborted after {:.3}ms",
                self.key,
                elapsed_ms
            ),
        }

        metrics::record_request(self.method.as_str(), self.status, elapsed);
    }
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// Middleware timing every request through the rest of the pipeline.
pub async fn log_request(request: Request, next: Next) -> Response {
    let mut timer = RequestTimer::start(&request);
    let response = next.run(request).await;
    timer.status = Some(response.status());
    response
}
