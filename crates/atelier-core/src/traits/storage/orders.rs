//! `IOrderStorage`: the `orders` and `order_items` tables.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::models::{NewOrder, NewOrderItem, Order, OrderItem};
use crate::workflow::{OrderStatus, OrderTransition};

/// Which orders to list. Results are always newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    /// Exact match on the stored (already lowercased) email.
    pub email: Option<String>,
    pub status: Option<OrderStatus>,
}

pub trait IOrderStorage: Send + Sync {
    /// Insert an order with status `pending`.
    fn insert_order(&self, order: &NewOrder) -> Result<Order, StorageError>;

    /// Insert all line items of an order. Either every row is written or none.
    fn insert_order_items(
        &self,
        order_id: &str,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItem>, StorageError>;

    /// Delete an order and any items it has.
    fn delete_order(&self, id: &str) -> Result<(), StorageError>;

    fn get_order(&self, id: &str) -> Result<Option<Order>, StorageError>;

    fn list_order_items(&self, order_id: &str) -> Result<Vec<OrderItem>, StorageError>;

    fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, StorageError>;

    /// Write `transition.to` (and the tracking link, if any) in one UPDATE,
    /// only if the order is still in `transition.from`. `None` when no row
    /// matched.
    fn transition_order(
        &self,
        id: &str,
        transition: &OrderTransition,
    ) -> Result<Option<Order>, StorageError>;

    /// `(status, total_amount)` for every order, for revenue reporting.
    fn order_totals(&self) -> Result<Vec<(OrderStatus, f64)>, StorageError>;
}

impl<T: IOrderStorage + ?Sized> IOrderStorage for Arc<T> {
    fn insert_order(&self, order: &NewOrder) -> Result<Order, StorageError> {
        (**self).insert_order(order)
    }
    fn insert_order_items(
        &self,
        order_id: &str,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItem>, StorageError> {
        (**self).insert_order_items(order_id, items)
    }
    fn delete_order(&self, id: &str) -> Result<(), StorageError> {
        (**self).delete_order(id)
    }
    fn get_order(&self, id: &str) -> Result<Option<Order>, StorageError> {
        (**self).get_order(id)
    }
    fn list_order_items(&self, order_id: &str) -> Result<Vec<OrderItem>, StorageError> {
        (**self).list_order_items(order_id)
    }
    fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, StorageError> {
        (**self).list_orders(filter)
    }
    fn transition_order(
        &self,
        id: &str,
        transition: &OrderTransition,
    ) -> Result<Option<Order>, StorageError> {
        (**self).transition_order(id, transition)
    }
    fn order_totals(&self) -> Result<Vec<(OrderStatus, f64)>, StorageError> {
        (**self).order_totals()
    }
}
