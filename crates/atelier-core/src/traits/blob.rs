//! `IBlobStorage`: the image bucket.

use std::sync::Arc;

use crate::errors::StorageError;

/// Object storage for uploaded images, addressed by relative path
/// (`products/…`, `custom-orders/…`).
pub trait IBlobStorage: Send + Sync {
    /// Store `bytes` at `path` and return its public URL.
    fn put(&self, path: &str, bytes: &[u8]) -> Result<String, StorageError>;

    /// Read an object back. `None` if nothing is stored at `path`.
    fn get(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Public URL for `path`, whether or not it exists.
    fn public_url(&self, path: &str) -> String;
}

impl<T: IBlobStorage + ?Sized> IBlobStorage for Arc<T> {
    fn put(&self, path: &str, bytes: &[u8]) -> Result<String, StorageError> {
        (**self).put(path, bytes)
    }
    fn get(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(path)
    }
    fn public_url(&self, path: &str) -> String {
        (**self).public_url(path)
    }
}
