//! Catalog orders and their line items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, normalize_email};
use crate::errors::{StorefrontError, StorefrontResult};
use crate::tracking::customer_tracking_url;
use crate::workflow::OrderStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_email: String,
    pub user_name: String,
    pub user_phone: Option<String>,
    pub shipping_address: String,
    pub status: OrderStatus,
    pub tracking_link: Option<String>,
    /// Fixed at checkout; later catalog edits never change it.
    pub total_amount: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Snapshot of a purchased product at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    /// `None` once the product has been hard-deleted.
    pub product_id: Option<String>,
    pub product_name: String,
    pub product_price: f64,
    pub quantity: i64,
    pub is_custom_request: bool,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.product_price * self.quantity as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Checkout contact and shipping form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub user_email: String,
    pub user_name: String,
    #[serde(default)]
    pub user_phone: Option<String>,
    pub shipping_address: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ContactDetails {
    /// Trim everything, lowercase the email, and require email, name, and address.
    pub fn normalized(&self) -> StorefrontResult<Self> {
        let user_email = normalize_email(&self.user_email);
        let user_name = self.user_name.trim().to_string();
        let shipping_address = self.shipping_address.trim().to_string();

        for (field, value) in [
            ("user_email", &user_email),
            ("user_name", &user_name),
            ("shipping_address", &shipping_address),
        ] {
            if value.is_empty() {
                return Err(StorefrontError::validation(format!("{field} is required")));
            }
        }

        Ok(Self {
            user_email,
            user_name,
            user_phone: non_blank(self.user_phone.as_deref()),
            shipping_address,
            notes: non_blank(self.notes.as_deref()),
        })
    }
}

/// Insert data for `orders`. Status always starts at `pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub contact: ContactDetails,
    pub total_amount: f64,
}

/// Insert data for `order_items`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: String,
    pub product_name: String,
    pub product_price: f64,
    pub quantity: i64,
}

/// An order as shown to the customer on the lookup page.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerOrderView {
    #[serde(flatten)]
    pub order: Order,
    pub status_label: &'static str,
    /// Tracking link with a scheme, ready to render as a link.
    pub tracking_url: Option<String>,
}

impl From<Order> for CustomerOrderView {
    fn from(order: Order) -> Self {
        let tracking_url = order
            .tracking_link
            .as_deref()
            .filter(|link| !link.is_empty())
            .map(customer_tracking_url);
        Self {
            status_label: order.status.customer_label(),
            tracking_url,
            order,
        }
    }
}
