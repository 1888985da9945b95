//! Calculation proxy.
//!
//! # Data Flow
//! ```text
//! POST /calculate {file, ...params}
//!     → CalculateRequest (file presence check)
//!     → client.rs: POST body verbatim to downstream
//!         ├─ usable reply (any status) → Outcome::Passthrough
//!         └─ transport error / blank body / falsy error body
//!              → LocalStore::exists(file) check
//!              → Outcome::FileNotFound
//! ```
//!
//! # Design Decisions
//! - One downstream attempt per request, no retries or circuit breaking
//! - The downstream body is never reinterpreted
//! - The fallback check is logged but does not change the message

pub mod client;
pub mod types;

use std::sync::Arc;

use axum::body::Bytes;
use serde_json::Value;

use crate::observability::metrics;
use crate::outcome::{is_present, Outcome};
use crate::storage::LocalStore;

pub use client::{DownstreamClient, DownstreamError, DownstreamReply};
pub use types::CalculateRequest;

/// Forwards calculate requests to the downstream service.
#[derive(Debug, Clone)]
pub struct CalculationProxy {
    client: DownstreamClient,
    store: Arc<LocalStore>,
}

impl CalculationProxy {
    pub fn new(client: DownstreamClient, store: Arc<LocalStore>) -> Self {
        Self { client, store }
    }

    /// Handle one calculate request given its raw body.
    pub async fn calculate(&self, body: Bytes, request_id: Option<&str>) -> Outcome {
        let request = match CalculateRequest::parse(&body) {
            Some(request) if is_present(&request.file) => request,
            _ => {
                tracing::debug!(request_id = ?request_id, "Calculate request missing file");
                return Outcome::InvalidInput { file: Value::Null };
            }
        };

        tracing::debug!(
            request_id = ?request_id,
            file = %request.file,
            downstream = %self.client.url(),
            "Forwarding calculate request"
        );

        match self.client.forward(body, request_id).await {
            Ok(reply) if reply.is_usable() => {
                if !reply.status.is_success() {
                    tracing::info!(
                        request_id = ?request_id,
                        status = %reply.status,
                        "Relaying downstream error body"
                    );
                }
                Outcome::Passthrough {
                    status: reply.status,
                    body: reply.body,
                }
            }
            Ok(reply) => {
                tracing::warn!(
                    request_id = ?request_id,
                    status = %reply.status,
                    "Downstream returned no usable body"
                );
                metrics::record_downstream_failure("empty_body");
                self.fallback(request).await
            }
            Err(e) => {
                tracing::warn!(request_id = ?request_id, error = %e, "Downstream unreachable");
                metrics::record_downstream_failure("transport");
                self.fallback(request).await
            }
        }
    }

    async fn fallback(&self, request: CalculateRequest) -> Outcome {
        let file_exists = match request.file_name() {
            Some(name) => self.store.exists(name).await,
            None => false,
        };
        tracing::info!(file = %request.file, file_exists, "Fallback storage check");

        Outcome::FileNotFound {
            file: request.file,
            file_exists,
        }
    }
}
