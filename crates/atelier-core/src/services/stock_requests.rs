use tracing::info;

use super::Storefront;
use crate::errors::{StorefrontError, StorefrontResult, WorkflowError};
use crate::models::{StockRequest, StockRequestForm, StockRequestWithProduct};
use crate::traits::IStockRequestStorage;
use crate::workflow::StockRequestAction;

impl Storefront {
    /// Ask to be told when a product is back. Only sold-out products accept
    /// requests, and every submission is its own row.
    pub fn request_stock(&self, form: &StockRequestForm) -> StorefrontResult<StockRequest> {
        let new_request = form.normalized()?;
        let product = self.product(&new_request.product_id)?;
        if !product.is_out_of_stock() {
            return Err(WorkflowError::ProductInStock {
                product_id: product.id,
                stock: product.stock,
            }
            .into());
        }
        let request = self.storage.insert_stock_request(&new_request)?;
        info!(request_id = %request.id, product_id = %product.id, "stock request created");
        Ok(request)
    }

    pub fn stock_requests(&self) -> StorefrontResult<Vec<StockRequestWithProduct>> {
        Ok(self.storage.list_stock_requests()?)
    }

    pub fn advance_stock_request(
        &self,
        id: &str,
        action: StockRequestAction,
    ) -> StorefrontResult<StockRequest> {
        let current = self
            .storage
            .get_stock_request(id)?
            .ok_or_else(|| StorefrontError::not_found("stock request", id))?;
        let to = current.status.apply(action)?;
        let updated = self
            .storage
            .transition_stock_request(id, current.status, to)?
            .ok_or_else(|| WorkflowError::StaleStatus {
                entity: "stock request",
                id: id.to_string(),
                expected: current.status.to_string(),
            })?;
        info!(request_id = id, from = %current.status, to = %to, "stock request advanced");
        Ok(updated)
    }
}
