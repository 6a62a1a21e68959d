//! Back-in-stock notification requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::normalize_email;
use crate::errors::{StorefrontError, StorefrontResult};
use crate::workflow::StockRequestStatus;

/// Name recorded when the customer leaves it blank.
pub const DEFAULT_REQUESTER_NAME: &str = "Customer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRequest {
    pub id: String,
    pub product_id: String,
    pub user_email: String,
    pub user_name: String,
    pub quantity: i64,
    pub status: StockRequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Admin listing row, joined with the product name.
#[derive(Debug, Clone, Serialize)]
pub struct StockRequestWithProduct {
    #[serde(flatten)]
    pub request: StockRequest,
    pub product_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockRequestForm {
    pub product_id: String,
    pub user_email: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStockRequest {
    pub product_id: String,
    pub user_email: String,
    pub user_name: String,
    pub quantity: i64,
}

impl StockRequestForm {
    pub fn normalized(&self) -> StorefrontResult<NewStockRequest> {
        let user_email = normalize_email(&self.user_email);
        if user_email.is_empty() {
            return Err(StorefrontError::validation("user_email is required"));
        }
        let quantity = self.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(StorefrontError::validation("quantity must be at least 1"));
        }
        let user_name = self
            .user_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_REQUESTER_NAME)
            .to_string();

        Ok(NewStockRequest {
            product_id: self.product_id.trim().to_string(),
            user_email,
            user_name,
            quantity,
        })
    }
}
