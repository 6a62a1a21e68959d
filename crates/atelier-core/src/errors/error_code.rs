//! Stable error codes surfaced in API error bodies.

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
pub const STALE_STATUS: &str = "STALE_STATUS";
pub const PRODUCT_IN_STOCK: &str = "PRODUCT_IN_STOCK";
pub const MISSING_TRACKING_LINK: &str = "MISSING_TRACKING_LINK";
pub const INVALID_QUOTE: &str = "INVALID_QUOTE";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const BLOB_ERROR: &str = "BLOB_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

/// Maps an error to one of the constants above.
pub trait StorefrontErrorCode {
    fn error_code(&self) -> &'static str;
}
