//! `StorageEngine`: SQLite storage implementing every storefront storage trait.
//!
//! All reads go through `with_reader()`, all writes through `with_writer()`.
//! No code outside this module touches a raw `&Connection`.

use std::path::Path;

use tracing::info;

use atelier_core::errors::StorageError;
use atelier_core::models::{
    CustomOrder, NewCustomOrder, NewOrder, NewOrderItem, NewProduct, NewStockRequest, Order,
    OrderItem, Product, ProductPatch, StockRequest, StockRequestWithProduct,
};
use atelier_core::traits::storage::{
    CustomOrderFilter, ICatalogStorage, ICustomOrderStorage, IOrderStorage, IStockRequestStorage,
    OrderFilter, ProductFilter,
};
use atelier_core::workflow::{
    CustomOrderTransition, OrderStatus, OrderTransition, StockRequestStatus,
};

use crate::migrations;
use crate::pool::{ConnectionPool, DEFAULT_READ_POOL_SIZE};
use crate::queries::{custom_order_ops, order_ops, product_ops, stock_request_ops};

pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open (or create) a database file and bring its schema up to date.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let pool = ConnectionPool::open(path, DEFAULT_READ_POOL_SIZE)?;
        let applied = pool.with_writer(migrations::run_migrations)?;
        info!(path = %path.display(), applied, "storage engine opened");
        Ok(Self { pool })
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let pool = ConnectionPool::open_in_memory()?;
        pool.with_writer(migrations::run_migrations)?;
        Ok(Self { pool })
    }

    pub fn path(&self) -> Option<&Path> {
        self.pool.path()
    }

    pub fn schema_version(&self) -> Result<u32, StorageError> {
        self.pool.with_reader(migrations::current_version)
    }

    /// Re-run the migration runner. A no-op on an up-to-date schema.
    pub fn migrate(&self) -> Result<u32, StorageError> {
        self.pool.with_writer(migrations::run_migrations)
    }
}

impl ICatalogStorage for StorageEngine {
    fn insert_product(&self, product: &NewProduct) -> Result<Product, StorageError> {
        self.pool
            .with_writer(|conn| product_ops::insert_product(conn, product))
    }

    fn get_product(&self, id: &str) -> Result<Option<Product>, StorageError> {
        self.pool.with_reader(|conn| product_ops::get_product(conn, id))
    }

    fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StorageError> {
        self.pool
            .with_reader(|conn| product_ops::list_products(conn, filter))
    }

    fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<Product, StorageError> {
        self.pool
            .with_writer(|conn| product_ops::update_product(conn, id, patch))
    }

    fn delete_product(&self, id: &str) -> Result<(), StorageError> {
        self.pool
            .with_writer(|conn| product_ops::delete_product(conn, id))
    }

    fn count_products(&self) -> Result<i64, StorageError> {
        self.pool.with_reader(product_ops::count_products)
    }
}

impl IOrderStorage for StorageEngine {
    fn insert_order(&self, order: &NewOrder) -> Result<Order, StorageError> {
        self.pool.with_writer(|conn| order_ops::insert_order(conn, order))
    }

    fn insert_order_items(
        &self,
        order_id: &str,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItem>, StorageError> {
        self.pool
            .with_writer(|conn| order_ops::insert_order_items(conn, order_id, items))
    }

    fn delete_order(&self, id: &str) -> Result<(), StorageError> {
        self.pool.with_writer(|conn| order_ops::delete_order(conn, id))
    }

    fn get_order(&self, id: &str) -> Result<Option<Order>, StorageError> {
        self.pool.with_reader(|conn| order_ops::get_order(conn, id))
    }

    fn list_order_items(&self, order_id: &str) -> Result<Vec<OrderItem>, StorageError> {
        self.pool
            .with_reader(|conn| order_ops::list_order_items(conn, order_id))
    }

    fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, StorageError> {
        self.pool.with_reader(|conn| order_ops::list_orders(conn, filter))
    }

    fn transition_order(
        &self,
        id: &str,
        transition: &OrderTransition,
    ) -> Result<Option<Order>, StorageError> {
        self.pool
            .with_writer(|conn| order_ops::transition_order(conn, id, transition))
    }

    fn order_totals(&self) -> Result<Vec<(OrderStatus, f64)>, StorageError> {
        self.pool.with_reader(order_ops::order_totals)
    }
}

impl ICustomOrderStorage for StorageEngine {
    fn insert_custom_order(&self, order: &NewCustomOrder) -> Result<CustomOrder, StorageError> {
        self.pool
            .with_writer(|conn| custom_order_ops::insert_custom_order(conn, order))
    }

    fn get_custom_order(&self, id: &str) -> Result<Option<CustomOrder>, StorageError> {
        self.pool
            .with_reader(|conn| custom_order_ops::get_custom_order(conn, id))
    }

    fn list_custom_orders(
        &self,
        filter: &CustomOrderFilter,
    ) -> Result<Vec<CustomOrder>, StorageError> {
        self.pool
            .with_reader(|conn| custom_order_ops::list_custom_orders(conn, filter))
    }

    fn transition_custom_order(
        &self,
        id: &str,
        transition: &CustomOrderTransition,
    ) -> Result<Option<CustomOrder>, StorageError> {
        self.pool
            .with_writer(|conn| custom_order_ops::transition_custom_order(conn, id, transition))
    }
}

impl IStockRequestStorage for StorageEngine {
    fn insert_stock_request(&self, request: &NewStockRequest) -> Result<StockRequest, StorageError> {
        self.pool
            .with_writer(|conn| stock_request_ops::insert_stock_request(conn, request))
    }

    fn get_stock_request(&self, id: &str) -> Result<Option<StockRequest>, StorageError> {
        self.pool
            .with_reader(|conn| stock_request_ops::get_stock_request(conn, id))
    }

    fn list_stock_requests(&self) -> Result<Vec<StockRequestWithProduct>, StorageError> {
        self.pool.with_reader(stock_request_ops::list_stock_requests)
    }

    fn transition_stock_request(
        &self,
        id: &str,
        from: StockRequestStatus,
        to: StockRequestStatus,
    ) -> Result<Option<StockRequest>, StorageError> {
        self.pool
            .with_writer(|conn| stock_request_ops::transition_stock_request(conn, id, from, to))
    }
}
