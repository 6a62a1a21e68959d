//! Storefront services running on the SQLite engine and filesystem blobs.

use std::sync::Arc;

use atelier_core::cart::CartItem;
use atelier_core::errors::{StorefrontError, WorkflowError};
use atelier_core::models::{ContactDetails, ImageUpload, ProductCategory, ProductForm};
use atelier_core::services::{CheckoutRequest, Storefront};
use atelier_core::traits::IBlobStorage;
use atelier_core::workflow::OrderAction;
use atelier_storage::{FsBlobStore, StorageEngine};

fn storefront(dir: &std::path::Path) -> (Storefront, Arc<FsBlobStore>) {
    let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
    let blobs = Arc::new(FsBlobStore::new(dir, "http://localhost/media"));
    (Storefront::new(engine, blobs.clone()), blobs)
}

fn form(name: &str, price: f64) -> ProductForm {
    ProductForm {
        name: name.into(),
        price,
        description: None,
        category: ProductCategory::Candle,
        fragrance_type: Some("cedar".into()),
        stock: 3,
        is_bestseller: true,
        is_active: true,
    }
}

#[test]
fn checkout_total_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let (shop, _) = storefront(dir.path());
    let a = shop.create_product(form("A", 450.0), None).unwrap();
    let b = shop.create_product(form("B", 650.0), None).unwrap();

    let placed = shop
        .submit_order(CheckoutRequest {
            contact: ContactDetails {
                user_email: "Asha@Example.com".into(),
                user_name: "Asha".into(),
                user_phone: None,
                shipping_address: "12 Lane".into(),
                notes: None,
            },
            items: vec![
                CartItem {
                    product: a.clone(),
                    quantity: 2,
                },
                CartItem {
                    product: b,
                    quantity: 1,
                },
            ],
        })
        .unwrap();
    assert_eq!(placed.order.total_amount, 1550.0);

    shop.set_stock(&a.id, 0).unwrap();
    let views = shop.customer_orders("asha@example.com").unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].order.total_amount, 1550.0);
}

#[test]
fn checkout_with_vanished_product_leaves_no_order() {
    let dir = tempfile::tempdir().unwrap();
    let (shop, _) = storefront(dir.path());
    let a = shop.create_product(form("A", 10.0), None).unwrap();
    shop.delete_product(&a.id).unwrap();

    let err = shop
        .submit_order(CheckoutRequest {
            contact: ContactDetails {
                user_email: "a@x.com".into(),
                user_name: "A".into(),
                user_phone: None,
                shipping_address: "addr".into(),
                notes: None,
            },
            items: vec![CartItem {
                product: a,
                quantity: 1,
            }],
        })
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Storage(_)));
    assert!(shop.list_orders(None).unwrap().is_empty());
}

#[test]
fn repeated_transition_refused() {
    let dir = tempfile::tempdir().unwrap();
    let (shop, _) = storefront(dir.path());
    let a = shop.create_product(form("A", 10.0), None).unwrap();
    let placed = shop
        .submit_order(CheckoutRequest {
            contact: ContactDetails {
                user_email: "a@x.com".into(),
                user_name: "A".into(),
                user_phone: None,
                shipping_address: "addr".into(),
                notes: None,
            },
            items: vec![CartItem {
                product: a,
                quantity: 1,
            }],
        })
        .unwrap();

    shop.transition_order(&placed.order.id, &OrderAction::Approve)
        .unwrap();
    let err = shop
        .transition_order(&placed.order.id, &OrderAction::Approve)
        .unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Workflow(WorkflowError::InvalidTransition { .. })
    ));
}

#[test]
fn product_image_lands_in_blob_root() {
    let dir = tempfile::tempdir().unwrap();
    let (shop, blobs) = storefront(dir.path());
    let product = shop
        .create_product(
            form("A", 10.0),
            Some(&ImageUpload {
                file_name: "amber.webp".into(),
                bytes: vec![9, 9, 9],
            }),
        )
        .unwrap();
    let url = product.image_url.unwrap();
    let path = url.strip_prefix("http://localhost/media/").unwrap();
    assert!(path.starts_with("products/"));
    assert!(path.ends_with(".webp"));
    assert_eq!(blobs.get(path).unwrap(), Some(vec![9, 9, 9]));
}
