//! Status workflow violations.

use super::error_code::{self, StorefrontErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("invalid {entity} transition: cannot {action} from {from}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        action: String,
    },

    #[error("{entity} {id} is no longer {expected}")]
    StaleStatus {
        entity: &'static str,
        id: String,
        expected: String,
    },

    #[error("product {product_id} still has {stock} in stock")]
    ProductInStock { product_id: String, stock: i64 },

    #[error("a tracking link is required to ship an order")]
    MissingTrackingLink,

    #[error("invalid quote: {reason}")]
    InvalidQuote { reason: String },
}

impl StorefrontErrorCode for WorkflowError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => error_code::INVALID_TRANSITION,
            Self::StaleStatus { .. } => error_code::STALE_STATUS,
            Self::ProductInStock { .. } => error_code::PRODUCT_IN_STOCK,
            Self::MissingTrackingLink => error_code::MISSING_TRACKING_LINK,
            Self::InvalidQuote { .. } => error_code::INVALID_QUOTE,
        }
    }
}
