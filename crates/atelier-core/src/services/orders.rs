use tracing::info;

use super::Storefront;
use crate::errors::{StorefrontError, StorefrontResult, WorkflowError};
use crate::models::{normalize_email, CustomerOrderView, Order, OrderWithItems};
use crate::traits::storage::OrderFilter;
use crate::traits::IOrderStorage;
use crate::workflow::{OrderAction, OrderStatus};

impl Storefront {
    /// A customer's orders, newest first, as shown on the lookup page.
    pub fn customer_orders(&self, email: &str) -> StorefrontResult<Vec<CustomerOrderView>> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(StorefrontError::validation("email is required"));
        }
        let orders = self.storage.list_orders(&OrderFilter {
            email: Some(email),
            status: None,
        })?;
        Ok(orders.into_iter().map(CustomerOrderView::from).collect())
    }

    /// Admin listing. `None` means every status.
    pub fn list_orders(&self, status: Option<OrderStatus>) -> StorefrontResult<Vec<Order>> {
        Ok(self.storage.list_orders(&OrderFilter {
            email: None,
            status,
        })?)
    }

    pub fn pending_orders(&self) -> StorefrontResult<Vec<Order>> {
        self.list_orders(Some(OrderStatus::Pending))
    }

    pub fn order(&self, id: &str) -> StorefrontResult<Order> {
        self.storage
            .get_order(id)?
            .ok_or_else(|| StorefrontError::not_found("order", id))
    }

    pub fn order_with_items(&self, id: &str) -> StorefrontResult<OrderWithItems> {
        let order = self.order(id)?;
        let items = self.storage.list_order_items(id)?;
        Ok(OrderWithItems { order, items })
    }

    /// Apply an admin action. The write only lands if the order is still in
    /// the status the action was checked against.
    pub fn transition_order(&self, id: &str, action: &OrderAction) -> StorefrontResult<Order> {
        let current = self.order(id)?;
        let transition = current.status.apply(action)?;
        let updated = self
            .storage
            .transition_order(id, &transition)?
            .ok_or_else(|| WorkflowError::StaleStatus {
                entity: "order",
                id: id.to_string(),
                expected: transition.from.to_string(),
            })?;
        info!(
            order_id = id,
            from = %transition.from,
            to = %transition.to,
            "order status changed"
        );
        Ok(updated)
    }
}
