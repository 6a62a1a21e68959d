//! Catalog products.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::non_blank;
use crate::errors::{StorefrontError, StorefrontResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Candle,
    Quilling,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Candle => "candle",
            Self::Quilling => "quilling",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candle" => Ok(Self::Candle),
            "quilling" => Ok(Self::Quilling),
            other => Err(StorefrontError::validation(format!("unknown category: {other}"))),
        }
    }
}

/// A product row. Also the snapshot embedded in cart lines, so the field
/// names are part of the persisted cart format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: ProductCategory,
    /// Candles only.
    pub fragrance_type: Option<String>,
    pub image_url: Option<String>,
    pub stock: i64,
    pub is_bestseller: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Zero stock is the only out-of-stock signal.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

/// Admin product form as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub category: ProductCategory,
    #[serde(default)]
    pub fragrance_type: Option<String>,
    pub stock: i64,
    #[serde(default)]
    pub is_bestseller: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Validated insert data for `products`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub fragrance_type: Option<String>,
    pub image_url: Option<String>,
    pub stock: i64,
    pub is_bestseller: bool,
    pub is_active: bool,
}

impl ProductForm {
    pub fn into_new_product(self, image_url: Option<String>) -> StorefrontResult<NewProduct> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(StorefrontError::validation("product name is required"));
        }
        validate_price(self.price)?;
        validate_stock(self.stock)?;

        let fragrance_type = match self.category {
            ProductCategory::Candle => non_blank(self.fragrance_type.as_deref()),
            ProductCategory::Quilling => None,
        };

        Ok(NewProduct {
            name,
            price: self.price,
            description: non_blank(self.description.as_deref()),
            category: self.category,
            fragrance_type,
            image_url,
            stock: self.stock,
            is_bestseller: self.is_bestseller,
            is_active: self.is_active,
        })
    }
}

/// Partial admin edit. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductUpdateForm {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<ProductCategory>,
    pub fragrance_type: Option<String>,
    pub stock: Option<i64>,
    pub is_bestseller: Option<bool>,
    pub is_active: Option<bool>,
}

/// Column-level patch for `products`. For nullable columns the outer
/// `Option` means "touch this column", the inner one is the new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<Option<String>>,
    pub category: Option<ProductCategory>,
    pub fragrance_type: Option<Option<String>>,
    pub image_url: Option<String>,
    pub stock: Option<i64>,
    pub is_bestseller: Option<bool>,
    pub is_active: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ProductUpdateForm {
    pub fn into_patch(self, image_url: Option<String>) -> StorefrontResult<ProductPatch> {
        let name = match self.name {
            Some(name) if name.trim().is_empty() => {
                return Err(StorefrontError::validation("product name is required"))
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
        }

        // Switching to quilling clears any fragrance.
        let fragrance_type = match (self.category, self.fragrance_type) {
            (Some(ProductCategory::Quilling), _) => Some(None),
            (_, Some(f)) => Some(non_blank(Some(&f))),
            (_, None) => None,
        };

        Ok(ProductPatch {
            name,
            price: self.price,
            description: self.description.map(|d| non_blank(Some(&d))),
            category: self.category,
            fragrance_type,
            image_url,
            stock: self.stock,
            is_bestseller: self.is_bestseller,
            is_active: self.is_active,
        })
    }
}

pub(crate) fn validate_price(price: f64) -> StorefrontResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(StorefrontError::validation("price must be a non-negative number"));
    }
    Ok(())
}

pub(crate) fn validate_stock(stock: i64) -> StorefrontResult<()> {
    if stock < 0 {
        return Err(StorefrontError::validation("stock must be non-negative"));
    }
    Ok(())
}

/// What the storefront offers for a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOption {
    AddToCart,
    /// Out of stock: the only path offered is a back-in-stock request.
    NotifyWhenAvailable,
}

impl Product {
    pub fn purchase_option(&self) -> PurchaseOption {
        if self.is_out_of_stock() {
            PurchaseOption::NotifyWhenAvailable
        } else {
            PurchaseOption::AddToCart
        }
    }
}

/// A product as listed on the public catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogProduct {
    #[serde(flatten)]
    pub product: Product,
    pub out_of_stock: bool,
    pub purchase_option: PurchaseOption,
}

impl From<Product> for CatalogProduct {
    fn from(product: Product) -> Self {
        Self {
            out_of_stock: product.is_out_of_stock(),
            purchase_option: product.purchase_option(),
            product,
        }
    }
}
