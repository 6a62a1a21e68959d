use serde::Deserialize;
use tracing::{error, info, warn};

use super::Storefront;
use crate::cart::{cart_subtotal, CartItem};
use crate::errors::{StorefrontError, StorefrontResult};
use crate::models::{ContactDetails, NewOrder, NewOrderItem, OrderWithItems};
use crate::traits::IOrderStorage;

/// Checkout body: the contact form plus the cart lines as held by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub contact: ContactDetails,
    pub items: Vec<CartItem>,
}

impl Storefront {
    /// Create the order and its item snapshots.
    ///
    /// The total is computed from the submitted product snapshots and frozen
    /// on the order. If the items cannot be written the order row is deleted
    /// again and the item error is returned.
    pub fn submit_order(&self, request: CheckoutRequest) -> StorefrontResult<OrderWithItems> {
        if request.items.is_empty() {
            return Err(StorefrontError::validation("cart is empty"));
        }
        if let Some(line) = request.items.iter().find(|i| i.quantity < 1) {
            return Err(StorefrontError::validation(format!(
                "quantity for {} must be at least 1",
                line.product.name
            )));
        }

        let contact = request.contact.normalized()?;
        if let Some(line) = request
            .items
            .iter()
            .find(|i| !i.product.price.is_finite() || i.product.price < 0.0)
        {
            return Err(StorefrontError::validation(format!(
                "price for {} must be a finite non-negative amount",
                line.product.name
            )));
        }
        let total_amount = cart_subtotal(&request.items);
        if !total_amount.is_finite() {
            return Err(StorefrontError::validation(
                "order total must be a finite amount",
            ));
        }
        let order = self.storage.insert_order(&NewOrder {
            contact,
            total_amount,
        })?;

        let new_items: Vec<NewOrderItem> = request
            .items
            .iter()
            .map(|line| NewOrderItem {
                product_id: line.product.id.clone(),
                product_name: line.product.name.clone(),
                product_price: line.product.price,
                quantity: line.quantity,
            })
            .collect();

        let items = match self.storage.insert_order_items(&order.id, &new_items) {
            Ok(items) => items,
            Err(item_err) => {
                warn!(order_id = %order.id, error = %item_err, "order items failed, removing order");
                if let Err(delete_err) = self.storage.delete_order(&order.id) {
                    error!(
                        order_id = %order.id,
                        item_error = %item_err,
                        delete_error = %delete_err,
                        "compensating delete failed; order left without items"
                    );
                }
                return Err(item_err.into());
            }
        };

        info!(
            order_id = %order.id,
            items = items.len(),
            total = order.total_amount,
            "order submitted"
        );
        Ok(OrderWithItems { order, items })
    }
}
