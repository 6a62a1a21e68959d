//! Device-local shopping cart.
//!
//! The whole cart lives under one key as a JSON list of
//! `{product, quantity}` lines. Every mutation reads the blob, edits it, and
//! writes it back. Prices and stock are never revalidated here; the product
//! snapshot taken at add time is what checkout sees.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::StorefrontResult;
use crate::models::Product;
use crate::traits::IKeyValueStore;

/// Key the cart blob is stored under.
pub const CART_KEY: &str = "cart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i64,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

/// Σ price × quantity over the given lines.
pub fn cart_subtotal(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::line_total).sum()
}

pub struct CartRepository<S: IKeyValueStore> {
    store: S,
}

impl<S: IKeyValueStore> CartRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current lines. A missing or unreadable blob is an empty cart.
    pub fn items(&self) -> StorefrontResult<Vec<CartItem>> {
        let Some(raw) = self.store.get(CART_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(error = %e, "discarding unreadable cart");
                Ok(Vec::new())
            }
        }
    }

    /// Add one unit of `product`, merging with an existing line.
    pub fn add(&self, product: Product) -> StorefrontResult<Vec<CartItem>> {
        let mut items = self.items()?;
        match items.iter_mut().find(|i| i.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => items.push(CartItem {
                product,
                quantity: 1,
            }),
        }
        self.save(items)
    }

    /// Shift a line's quantity by `delta`, never below 1.
    pub fn change_quantity(&self, product_id: &str, delta: i64) -> StorefrontResult<Vec<CartItem>> {
        let mut items = self.items()?;
        if let Some(line) = items.iter_mut().find(|i| i.product.id == product_id) {
            line.quantity = line.quantity.saturating_add(delta).max(1);
        }
        self.save(items)
    }

    pub fn remove(&self, product_id: &str) -> StorefrontResult<Vec<CartItem>> {
        let mut items = self.items()?;
        items.retain(|i| i.product.id != product_id);
        self.save(items)
    }

    pub fn clear(&self) -> StorefrontResult<()> {
        self.store.remove(CART_KEY)?;
        Ok(())
    }

    pub fn subtotal(&self) -> StorefrontResult<f64> {
        Ok(cart_subtotal(&self.items()?))
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> StorefrontResult<i64> {
        Ok(self
            .items()?
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.quantity)))
    }

    fn save(&self, items: Vec<CartItem>) -> StorefrontResult<Vec<CartItem>> {
        let raw = serde_json::to_string(&items)?;
        self.store.set(CART_KEY, &raw)?;
        Ok(items)
    }
}
