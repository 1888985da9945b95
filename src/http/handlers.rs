//! Endpoint handlers.
//!
//! Handlers read the raw body, delegate to the store or the proxy, and
//! render the resulting [`Outcome`](crate::outcome::Outcome).

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::Response,
    Json,
};
use serde::Serialize;

use crate::http::request::request_id;
use crate::http::response::render;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::outcome::Outcome;
use crate::storage::StoreFileRequest;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

/// `POST /store-file`
pub async fn store_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request = StoreFileRequest::parse(&body);
    let outcome = state.files.store(request).await;

    finish("store-file", request_id(&headers), outcome, &state, start_time)
}

/// `POST /calculate`
pub async fn calculate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);
    let outcome = state.calculator.calculate(body, request_id).await;

    finish("calculate", request_id, outcome, &state, start_time)
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

fn finish(
    endpoint: &'static str,
    request_id: Option<&str>,
    outcome: Outcome,
    state: &AppState,
    start_time: Instant,
) -> Response {
    tracing::debug!(
        request_id = ?request_id,
        endpoint,
        outcome = outcome.label(),
        error = outcome.is_error(),
        "Request handled"
    );
    metrics::record_request(endpoint, outcome.label(), start_time);
    render(outcome, state.status_policy)
}
