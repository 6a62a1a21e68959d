//! `IStockRequestStorage`: the `stock_requests` table.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::models::{NewStockRequest, StockRequest, StockRequestWithProduct};
use crate::workflow::StockRequestStatus;

pub trait IStockRequestStorage: Send + Sync {
    /// Always a new row; no de-duplication by product and email.
    fn insert_stock_request(&self, request: &NewStockRequest) -> Result<StockRequest, StorageError>;

    fn get_stock_request(&self, id: &str) -> Result<Option<StockRequest>, StorageError>;

    /// Newest first, joined with the product name.
    fn list_stock_requests(&self) -> Result<Vec<StockRequestWithProduct>, StorageError>;

    /// Set `to` if the row is still in `from`. `None` when no row matched.
    fn transition_stock_request(
        &self,
        id: &str,
        from: StockRequestStatus,
        to: StockRequestStatus,
    ) -> Result<Option<StockRequest>, StorageError>;
}

impl<T: IStockRequestStorage + ?Sized> IStockRequestStorage for Arc<T> {
    fn insert_stock_request(&self, request: &NewStockRequest) -> Result<StockRequest, StorageError> {
        (**self).insert_stock_request(request)
    }
    fn get_stock_request(&self, id: &str) -> Result<Option<StockRequest>, StorageError> {
        (**self).get_stock_request(id)
    }
    fn list_stock_requests(&self) -> Result<Vec<StockRequestWithProduct>, StorageError> {
        (**self).list_stock_requests()
    }
    fn transition_stock_request(
        &self,
        id: &str,
        from: StockRequestStatus,
        to: StockRequestStatus,
    ) -> Result<Option<StockRequest>, StorageError> {
        (**self).transition_stock_request(id, from, to)
    }
}
