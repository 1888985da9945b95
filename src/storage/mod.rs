//! File store handler.
//!
//! # Data Flow
//! ```text
//! POST /store-file {file, data}
//!     → StoreFileRequest::validate (presence, then type checks)
//!     → LocalStore::write (mkdir -p root, write <root>/<file>)
//!     → Outcome::Stored | InvalidInput | StorageFailed
//! ```
//!
//! # Design Decisions
//! - No locking: concurrent writes to one name are last-writer-wins
//! - No atomic rename: readers may see a partial file during a write
//! - I/O causes are logged, never returned to the caller

pub mod local;
pub mod types;

use std::sync::Arc;

use serde_json::Value;

use crate::outcome::Outcome;

pub use local::{LocalStore, StorageError};
pub use types::{StoreFileRequest, StoreInput};

/// Validates store requests and writes them through a [`LocalStore`].
#[derive(Debug, Clone)]
pub struct FileStoreHandler {
    store: Arc<LocalStore>,
}

impl FileStoreHandler {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Store `data` under `file`.
    pub async fn store(&self, request: StoreFileRequest) -> Outcome {
        let (file, data) = match request.validate() {
            StoreInput::Valid { file, data } => (file, data),
            StoreInput::Missing { file } => {
                tracing::debug!(file = %file, "Store request missing file or data");
                return Outcome::InvalidInput { file };
            }
            StoreInput::Unwritable { file } => {
                tracing::error!(file = %file, "Error storing file: file and data must be strings");
                return Outcome::StorageFailed { file };
            }
        };

        match self.store.write(&file, data.as_bytes()).await {
            Ok(path) => {
                tracing::info!(
                    file = %file,
                    path = %path.display(),
                    bytes = data.len(),
                    "File stored"
                );
                Outcome::Stored { file }
            }
            Err(StorageError::UnsafeName(_)) => {
                tracing::warn!(file = %file, "Rejected unsafe file name");
                Outcome::InvalidInput {
                    file: Value::String(file),
                }
            }
            Err(e) => {
                tracing::error!(file = %file, error = %e, "Error storing file");
                Outcome::StorageFailed {
                    file: Value::String(file),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use serde_json::json;

    fn handler(root: &std::path::Path, reject_unsafe_names: bool) -> FileStoreHandler {
        FileStoreHandler::new(Arc::new(LocalStore::new(&StorageConfig {
            root: root.to_path_buf(),
            reject_unsafe_names,
        })))
    }

    fn request(body: Value) -> StoreFileRequest {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn test_store_success() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = handler(dir.path(), false)
            .store(request(json!({"file": "x.csv", "data": "1,2,3"})))
            .await;

        assert_eq!(
            outcome,
            Outcome::Stored {
                file: "x.csv".to_string()
            }
        );
        assert_eq!(std::fs::read(dir.path().join("x.csv")).unwrap(), b"1,2,3");
    }

    #[tokio::test]
    async fn test_missing_data_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("pv");
        let outcome = handler(&root, false)
            .store(request(json!({"file": "x.csv"})))
            .await;

        assert_eq!(outcome, Outcome::InvalidInput { file: json!("x.csv") });
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_write_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the root directory should be.
        let root = dir.path().join("occupied");
        std::fs::write(&root, b"").unwrap();

        let outcome = handler(&root, false)
            .store(request(json!({"file": "x.csv", "data": "1"})))
            .await;
        assert_eq!(outcome, Outcome::StorageFailed { file: json!("x.csv") });
    }

    #[tokio::test]
    async fn test_non_string_fields_are_storage_errors() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("pv");
        let handler = handler(&root, false);

        let outcome = handler
            .store(request(json!({"file": "x.csv", "data": {"rows": [1, 2]}})))
            .await;
        assert_eq!(outcome, Outcome::StorageFailed { file: json!("x.csv") });

        let outcome = handler
            .store(request(json!({"file": 7, "data": "1"})))
            .await;
        assert_eq!(outcome, Outcome::StorageFailed { file: json!(7) });
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_empty_data_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("pv");
        let outcome = handler(&root, false)
            .store(request(json!({"file": "x.csv", "data": ""})))
            .await;

        assert_eq!(outcome, Outcome::InvalidInput { file: json!("x.csv") });
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_unsafe_name_is_invalid_input_when_guarded() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = handler(dir.path(), true)
            .store(request(json!({"file": "../x.csv", "data": "1"})))
            .await;
        assert_eq!(outcome, Outcome::InvalidInput { file: json!("../x.csv") });
    }
}
