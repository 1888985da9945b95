//! HTTP client for the downstream calculation service.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;

use crate::config::DownstreamConfig;
use crate::http::request::X_REQUEST_ID;
use crate::outcome::is_present;

/// Failure to get any answer out of the downstream service.
#[derive(Debug, Error)]
pub enum DownstreamError {
    #[error("failed to build downstream client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("downstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// What the downstream service sent back.
#[derive(Debug, Clone, PartialEq)]
pub struct DownstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

impl DownstreamReply {
    /// Whether the reply should be relayed rather than replaced by the
    /// fallback.
    ///
    /// A blank body is never usable. A success reply is otherwise relayed as
    /// is. An error reply is relayed only when its JSON value is present
    /// (not null, `false`, zero or `""`); non-JSON text counts as present.
    pub fn is_usable(&self) -> bool {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return false;
        }
        if self.status.is_success() {
            return true;
        }
        match serde_json::from_slice::<Value>(&self.body) {
            Ok(value) => is_present(&value),
            Err(_) => true,
        }
    }
}

/// Single-attempt JSON POST client. No retries.
#[derive(Debug, Clone)]
pub struct DownstreamClient {
    http: reqwest::Client,
    url: String,
}

impl DownstreamClient {
    pub fn new(config: &DownstreamConfig) -> Result<Self, DownstreamError> {
        let mut builder = reqwest::Client::builder().no_proxy();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(DownstreamError::Client)?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `body` unchanged and collect the full response.
    ///
    /// Any status is returned as a reply; only transport failures are errors.
    pub async fn forward(
        &self,
        body: Bytes,
        request_id: Option<&str>,
    ) -> Result<DownstreamReply, DownstreamError> {
        let mut request = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body);
        if let Some(id) = request_id.and_then(|id| HeaderValue::from_str(id).ok()) {
            request = request.header(X_REQUEST_ID, id);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(DownstreamReply { status, body })
    }
}
