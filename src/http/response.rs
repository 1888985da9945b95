//! Response rendering.
//!
//! # Responsibilities
//! - Turn an [`Outcome`] into a JSON response
//! - Choose the status code according to [`StatusPolicy`]
//!
//! # Design Decisions
//! - Compat policy answers 200 for everything; the body carries the result
//! - Passthrough bodies are sent byte-for-byte when they are JSON

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::StatusPolicy;
use crate::outcome::{Outcome, ERR_FILE_NOT_FOUND, ERR_INVALID_INPUT, ERR_STORAGE, MSG_SUCCESS};

/// Locally generated body: `file` plus exactly one of `message` / `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBody {
    pub file: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusBody {
    pub fn success(file: impl Into<Value>) -> Self {
        Self {
            file: file.into(),
            message: Some(MSG_SUCCESS.to_string()),
            error: None,
        }
    }

    pub fn error(file: impl Into<Value>, error: &str) -> Self {
        Self {
            file: file.into(),
            message: None,
            error: Some(error.to_string()),
        }
    }
}

/// Status code for `outcome` under `policy`.
pub fn status_for(outcome: &Outcome, policy: StatusPolicy) -> StatusCode {
    match policy {
        StatusPolicy::Compat => StatusCode::OK,
        StatusPolicy::Strict => match outcome {
            Outcome::Stored { .. } => StatusCode::OK,
            Outcome::Passthrough { status, .. } => *status,
            Outcome::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Outcome::StorageFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Outcome::FileNotFound { .. } => StatusCode::BAD_GATEWAY,
        },
    }
}

/// Render `outcome` as an HTTP response.
pub fn render(outcome: Outcome, policy: StatusPolicy) -> Response {
    let status = status_for(&outcome, policy);

    match outcome {
        Outcome::Stored { file } => (status, Json(StatusBody::success(file))).into_response(),
        Outcome::InvalidInput { file } => {
            (status, Json(StatusBody::error(file, ERR_INVALID_INPUT))).into_response()
        }
        Outcome::StorageFailed { file } => {
            (status, Json(StatusBody::error(file, ERR_STORAGE))).into_response()
        }
        Outcome::FileNotFound { file, .. } => {
            (status, Json(StatusBody::error(file, ERR_FILE_NOT_FOUND))).into_response()
        }
        Outcome::Passthrough { body, .. } => {
            if serde_json::from_slice::<serde::de::IgnoredAny>(&body).is_ok() {
                let mut response = Response::new(Body::from(body));
                *response.status_mut() = status;
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                response
            } else {
                // Non-JSON downstream text is relayed as a JSON string.
                let text = String::from_utf8_lossy(&body).into_owned();
                (status, Json(Value::String(text))).into_response()
            }
        }
    }
}
