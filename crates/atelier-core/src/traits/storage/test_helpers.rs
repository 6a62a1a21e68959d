//! `InMemoryStorefront` and `MemoryBlobStore`: in-memory test doubles for
//! `IStorefrontStorage` and `IBlobStorage`.
//!
//! Used by service tests to avoid opening a SQLite database or touching the
//! filesystem. Failures can be injected into the order-item insert, the order
//! delete, and blob writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use super::{
    CustomOrderFilter, ICatalogStorage, ICustomOrderStorage, IOrderStorage, IStockRequestStorage,
    OrderFilter, ProductFilter,
};
use crate::errors::StorageError;
use crate::traits::IBlobStorage;
use crate::models::{
    CustomOrder, NewCustomOrder, NewOrder, NewOrderItem, NewProduct, NewStockRequest, Order,
    OrderItem, Product, ProductPatch, StockRequest, StockRequestWithProduct,
};
use crate::workflow::{
    CustomOrderStatus, CustomOrderTransition, OrderStatus, OrderTransition, StockRequestStatus,
};

/// In-memory stub implementation of every storefront storage trait.
///
/// Rows are kept in insertion order; listings return them newest first.
#[derive(Default)]
pub struct InMemoryStorefront {
    products: Mutex<Vec<Product>>,
    orders: Mutex<Vec<Order>>,
    order_items: Mutex<Vec<OrderItem>>,
    custom_orders: Mutex<Vec<CustomOrder>>,
    stock_requests: Mutex<Vec<StockRequest>>,
    fail_order_items: AtomicBool,
    fail_order_delete: AtomicBool,
}

impl InMemoryStorefront {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `insert_order_items` call fail.
    pub fn fail_order_items(&self, fail: bool) {
        self.fail_order_items.store(fail, Ordering::SeqCst);
    }

    /// Make every `delete_order` call fail.
    pub fn fail_order_delete(&self, fail: bool) {
        self.fail_order_delete.store(fail, Ordering::SeqCst);
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn order_item_count(&self) -> usize {
        self.order_items.lock().unwrap().len()
    }
}

fn injected(what: &str) -> StorageError {
    StorageError::SqliteError {
        message: format!("injected failure: {what}"),
    }
}

impl ICatalogStorage for InMemoryStorefront {
    fn insert_product(&self, product: &NewProduct) -> Result<Product, StorageError> {
        let now = Utc::now();
        let row = Product {
            id: Uuid::new_v4().to_string(),
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            category: product.category,
            fragrance_type: product.fragrance_type.clone(),
            image_url: product.image_url.clone(),
            stock: product.stock,
            is_bestseller: product.is_bestseller,
            is_active: product.is_active,
            created_at: now,
            updated_at: now,
        };
        self.products.lock().unwrap().push(row.clone());
        Ok(row)
    }

    fn get_product(&self, id: &str) -> Result<Option<Product>, StorageError> {
        Ok(self.products.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StorageError> {
        let products = self.products.lock().unwrap();
        let matching = products
            .iter()
            .rev()
            .filter(|p| !filter.active_only || p.is_active)
            .filter(|p| !filter.bestsellers_only || p.is_bestseller)
            .filter(|p| filter.category.map_or(true, |c| p.category == c))
            .cloned();
        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<Product, StorageError> {
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StorageError::RowNotFound {
                table: "products",
                id: id.to_string(),
            })?;
        if let Some(name) = &patch.name {
            product.name = name.clone();
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(description) = &patch.description {
            product.description = description.clone();
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(fragrance) = &patch.fragrance_type {
            product.fragrance_type = fragrance.clone();
        }
        if let Some(image_url) = &patch.image_url {
            product.image_url = Some(image_url.clone());
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(flag) = patch.is_bestseller {
            product.is_bestseller = flag;
        }
        if let Some(flag) = patch.is_active {
            product.is_active = flag;
        }
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    fn delete_product(&self, id: &str) -> Result<(), StorageError> {
        self.products.lock().unwrap().retain(|p| p.id != id);
        for item in self.order_items.lock().unwrap().iter_mut() {
            if item.product_id.as_deref() == Some(id) {
                item.product_id = None;
            }
        }
        Ok(())
    }

    fn count_products(&self) -> Result<i64, StorageError> {
        Ok(self.products.lock().unwrap().len() as i64)
    }
}

impl IOrderStorage for InMemoryStorefront {
    fn insert_order(&self, order: &NewOrder) -> Result<Order, StorageError> {
        let now = Utc::now();
        let c = &order.contact;
        let row = Order {
            id: Uuid::new_v4().to_string(),
            user_email: c.user_email.clone(),
            user_name: c.user_name.clone(),
            user_phone: c.user_phone.clone(),
            shipping_address: c.shipping_address.clone(),
            status: OrderStatus::Pending,
            tracking_link: None,
            total_amount: order.total_amount,
            notes: c.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.orders.lock().unwrap().push(row.clone());
        Ok(row)
    }

    fn insert_order_items(
        &self,
        order_id: &str,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItem>, StorageError> {
        if self.fail_order_items.load(Ordering::SeqCst) {
            return Err(injected("insert_order_items"));
        }
        let now = Utc::now();
        let rows: Vec<OrderItem> = items
            .iter()
            .map(|item| OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.to_string(),
                product_id: Some(item.product_id.clone()),
                product_name: item.product_name.clone(),
                product_price: item.product_price,
                quantity: item.quantity,
                is_custom_request: false,
                created_at: now,
            })
            .collect();
        self.order_items.lock().unwrap().extend(rows.iter().cloned());
        Ok(rows)
    }

    fn delete_order(&self, id: &str) -> Result<(), StorageError> {
        if self.fail_order_delete.load(Ordering::SeqCst) {
            return Err(injected("delete_order"));
        }
        self.order_items.lock().unwrap().retain(|i| i.order_id != id);
        self.orders.lock().unwrap().retain(|o| o.id != id);
        Ok(())
    }

    fn get_order(&self, id: &str) -> Result<Option<Order>, StorageError> {
        Ok(self.orders.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    fn list_order_items(&self, order_id: &str) -> Result<Vec<OrderItem>, StorageError> {
        Ok(self
            .order_items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, StorageError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|o| filter.email.as_deref().map_or(true, |e| o.user_email == e))
            .filter(|o| filter.status.map_or(true, |s| o.status == s))
            .cloned()
            .collect())
    }

    fn transition_order(
        &self,
        id: &str,
        transition: &OrderTransition,
    ) -> Result<Option<Order>, StorageError> {
        let mut orders = self.orders.lock().unwrap();
        let Some(order) = orders
            .iter_mut()
            .find(|o| o.id == id && o.status == transition.from)
        else {
            return Ok(None);
        };
        order.status = transition.to;
        if let Some(link) = &transition.tracking_link {
            order.tracking_link = Some(link.clone());
        }
        order.updated_at = Utc::now();
        Ok(Some(order.clone()))
    }

    fn order_totals(&self) -> Result<Vec<(OrderStatus, f64)>, StorageError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .map(|o| (o.status, o.total_amount))
            .collect())
    }
}

impl ICustomOrderStorage for InMemoryStorefront {
    fn insert_custom_order(&self, order: &NewCustomOrder) -> Result<CustomOrder, StorageError> {
        let now = Utc::now();
        let row = CustomOrder {
            id: Uuid::new_v4().to_string(),
            user_email: order.user_email.clone(),
            user_name: order.user_name.clone(),
            user_phone: order.user_phone.clone(),
            description: order.description.clone(),
            reference_images: order.reference_images.clone(),
            budget_range: order.budget_range.clone(),
            deadline: order.deadline,
            status: CustomOrderStatus::Pending,
            admin_notes: None,
            quoted_price: None,
            created_at: now,
            updated_at: now,
        };
        self.custom_orders.lock().unwrap().push(row.clone());
        Ok(row)
    }

    fn get_custom_order(&self, id: &str) -> Result<Option<CustomOrder>, StorageError> {
        Ok(self
            .custom_orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    fn list_custom_orders(
        &self,
        filter: &CustomOrderFilter,
    ) -> Result<Vec<CustomOrder>, StorageError> {
        Ok(self
            .custom_orders
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|o| filter.email.as_deref().map_or(true, |e| o.user_email == e))
            .filter(|o| filter.status.map_or(true, |s| o.status == s))
            .cloned()
            .collect())
    }

    fn transition_custom_order(
        &self,
        id: &str,
        transition: &CustomOrderTransition,
    ) -> Result<Option<CustomOrder>, StorageError> {
        let mut orders = self.custom_orders.lock().unwrap();
        let Some(order) = orders
            .iter_mut()
            .find(|o| o.id == id && o.status == transition.from)
        else {
            return Ok(None);
        };
        order.status = transition.to;
        if let Some(quote) = &transition.quote {
            order.quoted_price = Some(quote.price);
            if let Some(notes) = &quote.admin_notes {
                order.admin_notes = Some(notes.clone());
            }
        }
        order.updated_at = Utc::now();
        Ok(Some(order.clone()))
    }
}

impl IStockRequestStorage for InMemoryStorefront {
    fn insert_stock_request(&self, request: &NewStockRequest) -> Result<StockRequest, StorageError> {
        let row = StockRequest {
            id: Uuid::new_v4().to_string(),
            product_id: request.product_id.clone(),
            user_email: request.user_email.clone(),
            user_name: request.user_name.clone(),
            quantity: request.quantity,
            status: StockRequestStatus::Pending,
            created_at: Utc::now(),
        };
        self.stock_requests.lock().unwrap().push(row.clone());
        Ok(row)
    }

    fn get_stock_request(&self, id: &str) -> Result<Option<StockRequest>, StorageError> {
        Ok(self
            .stock_requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    fn list_stock_requests(&self) -> Result<Vec<StockRequestWithProduct>, StorageError> {
        let products = self.products.lock().unwrap();
        Ok(self
            .stock_requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .map(|r| StockRequestWithProduct {
                product_name: products
                    .iter()
                    .find(|p| p.id == r.product_id)
                    .map(|p| p.name.clone()),
                request: r.clone(),
            })
            .collect())
    }

    fn transition_stock_request(
        &self,
        id: &str,
        from: StockRequestStatus,
        to: StockRequestStatus,
    ) -> Result<Option<StockRequest>, StorageError> {
        let mut requests = self.stock_requests.lock().unwrap();
        let Some(request) = requests.iter_mut().find(|r| r.id == id && r.status == from) else {
            return Ok(None);
        };
        request.status = to;
        Ok(Some(request.clone()))
    }
}

/// Blob store held in a map. Public URLs use the `memory://` scheme.
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_paths_containing: Mutex<Option<String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `put` whose path contains `needle`.
    pub fn fail_paths_containing(&self, needle: &str) {
        *self.fail_paths_containing.lock().unwrap() = Some(needle.to_string());
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl IBlobStorage for MemoryBlobStore {
    fn put(&self, path: &str, bytes: &[u8]) -> Result<String, StorageError> {
        if let Some(needle) = self.fail_paths_containing.lock().unwrap().as_deref() {
            if path.contains(needle) {
                return Err(StorageError::BlobError {
                    path: path.to_string(),
                    message: "injected failure".to_string(),
                });
            }
        }
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
        Ok(self.public_url(path))
    }

    fn get(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.objects.lock().unwrap().get(path).cloned())
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://{path}")
    }
}
