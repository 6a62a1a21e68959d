use tracing::info;

use super::uploads::ImagePrefix;
use super::Storefront;
use crate::errors::{StorageError, StorefrontError, StorefrontResult};
use crate::models::{
    validate_stock, CatalogProduct, ImageUpload, Product, ProductCategory, ProductForm, ProductPatch,
    ProductUpdateForm,
};
use crate::traits::storage::ProductFilter;
use crate::traits::ICatalogStorage;

/// Most bestsellers shown on the home page.
pub const BESTSELLER_LIMIT: usize = 6;

impl Storefront {
    /// Public catalog, newest first.
    pub fn active_products(
        &self,
        category: Option<ProductCategory>,
    ) -> StorefrontResult<Vec<CatalogProduct>> {
        let products = self
            .storage
            .list_products(&ProductFilter::storefront(category))?;
        Ok(products.into_iter().map(CatalogProduct::from).collect())
    }

    pub fn bestsellers(&self) -> StorefrontResult<Vec<CatalogProduct>> {
        let filter = ProductFilter {
            active_only: true,
            bestsellers_only: true,
            category: None,
            limit: Some(BESTSELLER_LIMIT),
        };
        let products = self.storage.list_products(&filter)?;
        Ok(products.into_iter().map(CatalogProduct::from).collect())
    }

    /// Public product page. Inactive products are not found.
    pub fn catalog_product(&self, id: &str) -> StorefrontResult<CatalogProduct> {
        let product = self.product(id)?;
        if !product.is_active {
            return Err(StorefrontError::not_found("product", id));
        }
        Ok(product.into())
    }

    /// Admin listing, inactive included.
    pub fn all_products(&self) -> StorefrontResult<Vec<Product>> {
        Ok(self.storage.list_products(&ProductFilter::all())?)
    }

    pub fn product(&self, id: &str) -> StorefrontResult<Product> {
        self.storage
            .get_product(id)?
            .ok_or_else(|| StorefrontError::not_found("product", id))
    }

    /// Create a product. A failed image upload still creates it, without image.
    pub fn create_product(
        &self,
        form: ProductForm,
        image: Option<&ImageUpload>,
    ) -> StorefrontResult<Product> {
        // Validate before spending an upload on a form that will be refused.
        form.clone().into_new_product(None)?;
        let image_url = image.and_then(|img| self.upload_image(ImagePrefix::Products, img));
        let new_product = form.into_new_product(image_url)?;
        let product = self.storage.insert_product(&new_product)?;
        info!(id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// Partial update. A new image replaces the URL only if its upload succeeds.
    pub fn update_product(
        &self,
        id: &str,
        form: ProductUpdateForm,
        image: Option<&ImageUpload>,
    ) -> StorefrontResult<Product> {
        let current = self.product(id)?;
        form.clone().into_patch(None)?;
        let image_url = image.and_then(|img| self.upload_image(ImagePrefix::Products, img));
        let mut patch = form.into_patch(image_url)?;
        // Setting a fragrance on a product that stays quilling is dropped.
        if patch.category.is_none() && current.category == ProductCategory::Quilling {
            patch.fragrance_type = patch.fragrance_type.map(|_| None);
        }
        self.apply_patch(id, &patch)
    }

    /// Soft delete: hidden from the storefront, kept for admin and history.
    pub fn deactivate_product(&self, id: &str) -> StorefrontResult<Product> {
        let patch = ProductPatch {
            is_active: Some(false),
            ..ProductPatch::default()
        };
        let product = self.apply_patch(id, &patch)?;
        info!(id, "product deactivated");
        Ok(product)
    }

    /// Hard delete. Order items keep their snapshot.
    pub fn delete_product(&self, id: &str) -> StorefrontResult<()> {
        self.product(id)?;
        self.storage.delete_product(id)?;
        info!(id, "product deleted");
        Ok(())
    }

    pub fn set_stock(&self, id: &str, stock: i64) -> StorefrontResult<Product> {
        validate_stock(stock)?;
        let patch = ProductPatch {
            stock: Some(stock),
            ..ProductPatch::default()
        };
        let product = self.apply_patch(id, &patch)?;
        info!(id, stock, "stock updated");
        Ok(product)
    }

    fn apply_patch(&self, id: &str, patch: &ProductPatch) -> StorefrontResult<Product> {
        if patch.is_empty() {
            return self.product(id);
        }
        self.storage.update_product(id, patch).map_err(|e| match e {
            StorageError::RowNotFound { .. } => {
                StorefrontError::not_found("product", id)
            }
            other => other.into(),
        })
    }
}
