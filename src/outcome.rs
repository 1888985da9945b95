//! Handler outcomes.
//!
//! Both handlers resolve every request to one of these variants. The HTTP
//! layer decides the status code (see [`crate::config::StatusPolicy`]) and
//! renders the body.

use axum::body::Bytes;
use axum::http::StatusCode;
use serde_json::Value;

pub const MSG_SUCCESS: &str = "Success.";
pub const ERR_INVALID_INPUT: &str = "Invalid JSON input.";
pub const ERR_STORAGE: &str = "Error while storing the file to the storage.";
pub const ERR_FILE_NOT_FOUND: &str = "File not found.";

/// Result of handling one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// File written to the storage root.
    Stored { file: String },

    /// Downstream body relayed unchanged, with the status it came with.
    Passthrough { status: StatusCode, body: Bytes },

    /// Required fields missing or malformed. `file` is the echo or null.
    InvalidInput { file: Value },

    /// Directory creation or write failed, or the fields could not be
    /// written as given. `file` is echoed as received.
    StorageFailed { file: Value },

    /// Downstream gave no usable answer. `file_exists` records the local
    /// existence check; it does not change the message.
    FileNotFound { file: Value, file_exists: bool },
}

impl Outcome {
    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Stored { .. } => "stored",
            Outcome::Passthrough { .. } => "passthrough",
            Outcome::InvalidInput { .. } => "invalid_input",
            Outcome::StorageFailed { .. } => "storage_error",
            Outcome::FileNotFound { .. } => "file_not_found",
        }
    }

    pub fn is_error(&self) -> bool {
        match self {
            Outcome::Stored { .. } => false,
            Outcome::Passthrough { status, .. } => !status.is_success(),
            _ => true,
        }
    }
}

/// Whether a JSON value counts as supplied.
///
/// Null, `false`, zero and the empty string count as absent.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The value to echo back as `file`: the request's own value, or null.
pub fn echo(value: &Value) -> Value {
    if is_present(value) {
        value.clone()
    } else {
        Value::Null
    }
}
