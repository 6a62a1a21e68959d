pub mod error_code;
mod storage_error;
mod storefront_error;
mod workflow_error;

pub use error_code::StorefrontErrorCode;
pub use storage_error::StorageError;
pub use storefront_error::{StorefrontError, StorefrontResult};
pub use workflow_error::WorkflowError;
