//! Persistence-layer errors (SQLite, blob store, device key-value store).

use super::error_code::{self, StorefrontErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("{table} row not found: {id}")]
    RowNotFound { table: &'static str, id: String },

    #[error("Corrupt {table} row: {details}")]
    CorruptRow { table: &'static str, details: String },

    #[error("Blob store error at {path}: {message}")]
    BlobError { path: String, message: String },

    #[error("Key-value store error: {message}")]
    KeyValueError { message: String },
}

impl StorefrontErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::RowNotFound { .. } => error_code::NOT_FOUND,
            Self::BlobError { .. } => error_code::BLOB_ERROR,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
