//! Store request shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::outcome::{echo, is_present};

/// Body of `POST /store-file`.
///
/// Fields are kept as raw JSON so that a wrong type is reported by
/// [`StoreFileRequest::validate`] rather than as a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreFileRequest {
    #[serde(default)]
    pub file: Value,
    #[serde(default)]
    pub data: Value,
}

impl StoreFileRequest {
    /// Parse a raw body. Anything that is not a JSON object reads as a
    /// request with neither field set.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(body)
            .ok()
            .filter(Value::is_object)
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }

    /// Classify the request.
    ///
    /// `file` or `data` that is null, empty, zero or `false` counts as
    /// missing. Present values of the wrong type cannot be written.
    pub fn validate(self) -> StoreInput {
        if !is_present(&self.file) || !is_present(&self.data) {
            return StoreInput::Missing {
                file: echo(&self.file),
            };
        }
        match (self.file, self.data) {
            (Value::String(file), Value::String(data)) => StoreInput::Valid { file, data },
            (file, _) => StoreInput::Unwritable { file },
        }
    }
}

/// A store request after presence and type checks.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreInput {
    Valid { file: String, data: String },

    /// Required field absent. `file` is the echo or null.
    Missing { file: Value },

    /// Both fields present but `file` or `data` is not a string.
    Unwritable { file: Value },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> StoreFileRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_parse_non_objects_as_empty() {
        let bodies: [&[u8]; 3] = [br#"["a.txt","x"]"#, b"{oops", b"42"];
        for body in bodies {
            let request = StoreFileRequest::parse(body);
            assert!(request.file.is_null());
            assert!(request.data.is_null());
        }
    }

    #[test]
    fn test_valid_request() {
        assert_eq!(
            parse(json!({"file": "a.txt", "data": "hello"})).validate(),
            StoreInput::Valid {
                file: "a.txt".to_string(),
                data: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_empty_data_is_missing() {
        assert_eq!(
            parse(json!({"file": "a.txt", "data": ""})).validate(),
            StoreInput::Missing { file: json!("a.txt") }
        );
    }

    #[test]
    fn test_missing_fields_echo_file() {
        assert_eq!(
            parse(json!({"data": "x"})).validate(),
            StoreInput::Missing { file: Value::Null }
        );
        assert_eq!(
            parse(json!({"file": "", "data": "x"})).validate(),
            StoreInput::Missing { file: Value::Null }
        );
        assert_eq!(
            parse(json!({"file": "a.txt"})).validate(),
            StoreInput::Missing { file: json!("a.txt") }
        );
        assert_eq!(
            parse(json!({"file": "a.txt", "data": 0})).validate(),
            StoreInput::Missing { file: json!("a.txt") }
        );
    }

    #[test]
    fn test_wrong_types_are_unwritable() {
        assert_eq!(
            parse(json!({"file": "a.txt", "data": 5})).validate(),
            StoreInput::Unwritable { file: json!("a.txt") }
        );
        assert_eq!(
            parse(json!({"file": 12, "data": "x"})).validate(),
            StoreInput::Unwritable { file: json!(12) }
        );
        assert_eq!(
            parse(json!({"file": "a.txt", "data": {"rows": 3}})).validate(),
            StoreInput::Unwritable { file: json!("a.txt") }
        );
    }
}
