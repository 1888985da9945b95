//! Calculate request shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /calculate`.
///
/// Only `file` is inspected. Everything else rides along in `params` and is
/// never interpreted here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub file: Value,

    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl CalculateRequest {
    /// Parse a raw body. Anything that is not a JSON object yields `None`.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// `file` as a name usable for the local storage check.
    pub fn file_name(&self) -> Option<&str> {
        self.file.as_str().filter(|s| !s.is_empty())
    }
}
