mod custom_order;
mod image;
mod order;
mod product;
mod stock_request;

pub use custom_order::{CustomOrder, CustomOrderForm, NewCustomOrder};
pub use image::{EncodedImage, ImageUpload};
pub use order::{
    ContactDetails, CustomerOrderView, NewOrder, NewOrderItem, Order, OrderItem, OrderWithItems,
};
pub use product::{
    CatalogProduct, NewProduct, Product, ProductCategory, ProductForm, ProductPatch,
    ProductUpdateForm, PurchaseOption,
};
pub(crate) use product::validate_stock;
pub use stock_request::{
    NewStockRequest, StockRequest, StockRequestForm, StockRequestWithProduct, DEFAULT_REQUESTER_NAME,
};

/// Trim a free-text form value; blank becomes `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Email as used for customer lookups: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_become_none() {
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" lavender ")), Some("lavender".to_string()));
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Asha@Example.COM "), "asha@example.com");
    }
}
