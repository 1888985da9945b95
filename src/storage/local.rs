//! Filesystem access under the storage root.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::StorageConfig;

/// Errors raised while touching the storage root.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file name {0:?} is not a single path component")]
    UnsafeName(String),

    #[error("failed to create storage root {path}: {source}")]
    CreateRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Storage root on a local or shared volume.
///
/// Holds no handles between calls. Concurrent writes to the same name are
/// not ordered; the last one to finish wins.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    reject_unsafe_names: bool,
}

impl LocalStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: config.root.clone(),
            reject_unsafe_names: config.reject_unsafe_names,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join `name` under the root.
    ///
    /// A leading `/` or drive prefix is dropped, so absolute names still land
    /// inside the root. With `reject_unsafe_names` off, `..` segments are kept
    /// as given.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        if self.reject_unsafe_names && !is_plain_name(name) {
            return Err(StorageError::UnsafeName(name.to_string()));
        }
        let relative: PathBuf = Path::new(name)
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        Ok(self.root.join(relative))
    }

    /// Create the root if needed and write `data` to `<root>/<name>`,
    /// replacing any existing file.
    pub async fn write(&self, name: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.resolve(name)?;

        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::CreateRoot {
                path: self.root.clone(),
                source,
            })?;

        let write_err = |source| StorageError::Write {
            path: path.clone(),
            source,
        };

        // The handle is dropped on every return path below.
        let mut file = fs::File::create(&path).await.map_err(write_err)?;
        file.write_all(data).await.map_err(write_err)?;
        file.flush().await.map_err(write_err)?;
        drop(file);

        Ok(path)
    }

    /// Whether `<root>/<name>` can be accessed. Errors count as absent.
    pub async fn exists(&self, name: &str) -> bool {
        match self.resolve(name) {
            Ok(path) => fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

/// A name made of exactly one normal path component.
fn is_plain_name(name: &str) -> bool {
    if name.contains('\\') || name.contains('\0') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
