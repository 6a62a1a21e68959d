//! `ICatalogStorage`: the `products` table.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::models::{NewProduct, Product, ProductCategory, ProductPatch};

/// Which products to list. Results are always newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub active_only: bool,
    pub bestsellers_only: bool,
    pub category: Option<ProductCategory>,
    pub limit: Option<usize>,
}

impl ProductFilter {
    /// Public catalog listing.
    pub fn storefront(category: Option<ProductCategory>) -> Self {
        Self {
            active_only: true,
            category,
            ..Self::default()
        }
    }

    /// Admin listing, inactive included.
    pub fn all() -> Self {
        Self::default()
    }
}

pub trait ICatalogStorage: Send + Sync {
    fn insert_product(&self, product: &NewProduct) -> Result<Product, StorageError>;

    fn get_product(&self, id: &str) -> Result<Option<Product>, StorageError>;

    fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StorageError>;

    /// Apply only the columns set in `patch`. `RowNotFound` if `id` is unknown.
    fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<Product, StorageError>;

    /// Remove the row. Order items keep their snapshot with a null product id.
    fn delete_product(&self, id: &str) -> Result<(), StorageError>;

    fn count_products(&self) -> Result<i64, StorageError>;
}

impl<T: ICatalogStorage + ?Sized> ICatalogStorage for Arc<T> {
    fn insert_product(&self, product: &NewProduct) -> Result<Product, StorageError> {
        (**self).insert_product(product)
    }
    fn get_product(&self, id: &str) -> Result<Option<Product>, StorageError> {
        (**self).get_product(id)
    }
    fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StorageError> {
        (**self).list_products(filter)
    }
    fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<Product, StorageError> {
        (**self).update_product(id, patch)
    }
    fn delete_product(&self, id: &str) -> Result<(), StorageError> {
        (**self).delete_product(id)
    }
    fn count_products(&self) -> Result<i64, StorageError> {
        (**self).count_products()
    }
}
