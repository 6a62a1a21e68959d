//! `ICustomOrderStorage`: the `custom_orders` table.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::models::{CustomOrder, NewCustomOrder};
use crate::workflow::{CustomOrderStatus, CustomOrderTransition};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomOrderFilter {
    pub email: Option<String>,
    pub status: Option<CustomOrderStatus>,
}

pub trait ICustomOrderStorage: Send + Sync {
    /// Insert with status `pending`.
    fn insert_custom_order(&self, order: &NewCustomOrder) -> Result<CustomOrder, StorageError>;

    fn get_custom_order(&self, id: &str) -> Result<Option<CustomOrder>, StorageError>;

    /// Newest first.
    fn list_custom_orders(
        &self,
        filter: &CustomOrderFilter,
    ) -> Result<Vec<CustomOrder>, StorageError>;

    /// Status plus, for quotes, price and notes in one UPDATE guarded by
    /// `transition.from`. `None` when no row matched.
    fn transition_custom_order(
        &self,
        id: &str,
        transition: &CustomOrderTransition,
    ) -> Result<Option<CustomOrder>, StorageError>;
}

impl<T: ICustomOrderStorage + ?Sized> ICustomOrderStorage for Arc<T> {
    fn insert_custom_order(&self, order: &NewCustomOrder) -> Result<CustomOrder, StorageError> {
        (**self).insert_custom_order(order)
    }
    fn get_custom_order(&self, id: &str) -> Result<Option<CustomOrder>, StorageError> {
        (**self).get_custom_order(id)
    }
    fn list_custom_orders(
        &self,
        filter: &CustomOrderFilter,
    ) -> Result<Vec<CustomOrder>, StorageError> {
        (**self).list_custom_orders(filter)
    }
    fn transition_custom_order(
        &self,
        id: &str,
        transition: &CustomOrderTransition,
    ) -> Result<Option<CustomOrder>, StorageError> {
        (**self).transition_custom_order(id, transition)
    }
}
