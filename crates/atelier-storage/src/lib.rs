//! # atelier-storage
//!
//! SQLite persistence for the Atelier storefront. Implements the storage
//! traits from `atelier-core` on `StorageEngine` (single write connection +
//! read pool, WAL mode), plus a filesystem blob store for images and a
//! file-backed key-value store for device-local state.

pub mod blob;
pub mod engine;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use blob::FsBlobStore;
pub use engine::StorageEngine;
pub use kv::FileKeyValueStore;

use atelier_core::errors::StorageError;

/// Helper to convert a string message into a `StorageError::SqliteError`.
pub fn to_storage_err(msg: String) -> StorageError {
    StorageError::SqliteError { message: msg }
}
