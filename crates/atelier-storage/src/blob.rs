//! `FsBlobStore`: image bucket on the local filesystem.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use atelier_core::config::BlobConfig;
use atelier_core::errors::StorageError;
use atelier_core::traits::IBlobStorage;

pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &BlobConfig) -> Self {
        Self::new(&config.root_dir, &config.public_base_url)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a bucket path to a file under the root. Only plain relative
    /// segments are accepted.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let plain = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(StorageError::BlobError {
                path: path.to_string(),
                message: "path must be relative without `..`".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl IBlobStorage for FsBlobStore {
    fn put(&self, path: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let file = self.resolve(path)?;
        let blob_err = |e: std::io::Error| StorageError::BlobError {
            path: path.to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(blob_err)?;
        }
        fs::write(&file, bytes).map_err(blob_err)?;
        debug!(path, bytes = bytes.len(), "blob written");
        Ok(self.public_url(path))
    }

    fn get(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let file = self.resolve(path)?;
        match fs::read(&file) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::BlobError {
                path: path.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{path}", self.public_base_url)
    }
}
