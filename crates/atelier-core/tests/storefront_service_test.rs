//! Storefront workflows against the in-memory storage doubles.

use std::sync::Arc;

use atelier_core::cart::CartItem;
use atelier_core::errors::{StorefrontError, WorkflowError};
use atelier_core::models::{
    ContactDetails, CustomOrderForm, ImageUpload, Product, ProductCategory, ProductForm,
    ProductUpdateForm, PurchaseOption, StockRequestForm,
};
use atelier_core::services::{CheckoutRequest, Storefront};
use atelier_core::traits::storage::test_helpers::{InMemoryStorefront, MemoryBlobStore};
use atelier_core::traits::ICatalogStorage;
use atelier_core::workflow::{
    CustomOrderAction, CustomOrderStatus, OrderAction, OrderStatus, StockRequestAction,
    StockRequestStatus,
};

// ─── Helpers ────────────────────────────────────────────────────────────────

struct Fixture {
    storage: Arc<InMemoryStorefront>,
    blobs: Arc<MemoryBlobStore>,
    storefront: Storefront,
}

fn fixture() -> Fixture {
    let storage = Arc::new(InMemoryStorefront::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let storefront = Storefront::new(storage.clone(), blobs.clone());
    Fixture {
        storage,
        blobs,
        storefront,
    }
}

fn candle_form(name: &str, price: f64, stock: i64) -> ProductForm {
    ProductForm {
        name: name.to_string(),
        price,
        description: Some("Hand poured".into()),
        category: ProductCategory::Candle,
        fragrance_type: Some("lavender".into()),
        stock,
        is_bestseller: false,
        is_active: true,
    }
}

fn contact() -> ContactDetails {
    ContactDetails {
        user_email: "  Asha@Example.com ".into(),
        user_name: "Asha".into(),
        user_phone: Some("   ".into()),
        shipping_address: "12 Lane, Pune".into(),
        notes: None,
    }
}

fn line(product: &Product, quantity: i64) -> CartItem {
    CartItem {
        product: product.clone(),
        quantity,
    }
}

fn image(name: &str) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        bytes: vec![1, 2, 3],
    }
}

// ─── Checkout ───────────────────────────────────────────────────────────────

#[test]
fn checkout_snapshots_prices_and_freezes_total() {
    let f = fixture();
    let a = f.storefront.create_product(candle_form("A", 450.0, 5), None).unwrap();
    let b = f.storefront.create_product(candle_form("B", 650.0, 5), None).unwrap();

    let placed = f
        .storefront
        .submit_order(CheckoutRequest {
            contact: contact(),
            items: vec![line(&a, 2), line(&b, 1)],
        })
        .unwrap();

    assert_eq!(placed.order.total_amount, 1550.0);
    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert_eq!(placed.order.user_email, "asha@example.com");
    assert_eq!(placed.order.user_phone, None);
    let mut prices: Vec<f64> = placed.items.iter().map(|i| i.product_price).collect();
    prices.sort_by(f64::total_cmp);
    assert_eq!(prices, vec![450.0, 650.0]);
    assert!(placed.items.iter().all(|i| !i.is_custom_request));

    f.storefront
        .update_product(
            &a.id,
            ProductUpdateForm {
                price: Some(500.0),
                ..Default::default()
            },
            None,
        )
        .unwrap();

    let detail = f.storefront.order_with_items(&placed.order.id).unwrap();
    assert_eq!(detail.order.total_amount, 1550.0);
    let a_item = detail
        .items
        .iter()
        .find(|i| i.product_id.as_deref() == Some(a.id.as_str()))
        .unwrap();
    assert_eq!(a_item.product_price, 450.0);
}

#[test]
fn empty_cart_is_a_validation_error() {
    let f = fixture();
    let err = f
        .storefront
        .submit_order(CheckoutRequest {
            contact: contact(),
            items: vec![],
        })
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Validation(_)));
    assert_eq!(f.storage.order_count(), 0);
}

#[test]
fn overflowing_total_is_a_validation_error() {
    let f = fixture();
    let a = f.storefront.create_product(candle_form("A", 1.0, 5), None).unwrap();
    let mut huge = a.clone();
    huge.price = 1e308;
    let err = f
        .storefront
        .submit_order(CheckoutRequest {
            contact: contact(),
            items: vec![line(&huge, 2)],
        })
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Validation(_)));
    assert_eq!(f.storage.order_count(), 0);
}

#[test]
fn non_finite_line_price_is_a_validation_error() {
    let f = fixture();
    let a = f.storefront.create_product(candle_form("A", 1.0, 5), None).unwrap();
    let mut broken = a.clone();
    broken.price = f64::NAN;
    let err = f
        .storefront
        .submit_order(CheckoutRequest {
            contact: contact(),
            items: vec![line(&broken, 1)],
        })
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Validation(_)));
    assert_eq!(f.storage.order_count(), 0);
}

#[test]
fn missing_address_is_a_validation_error() {
    let f = fixture();
    let a = f.storefront.create_product(candle_form("A", 1.0, 1), None).unwrap();
    let mut details = contact();
    details.shipping_address = "  ".into();
    let err = f
        .storefront
        .submit_order(CheckoutRequest {
            contact: details,
            items: vec![line(&a, 1)],
        })
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Validation(_)));
}

#[test]
fn failed_items_remove_the_order() {
    let f = fixture();
    let a = f.storefront.create_product(candle_form("A", 10.0, 1), None).unwrap();
    f.storage.fail_order_items(true);

    let err = f
        .storefront
        .submit_order(CheckoutRequest {
            contact: contact(),
            items: vec![line(&a, 1)],
        })
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Storage(_)));
    assert_eq!(f.storage.order_count(), 0);
    assert_eq!(f.storage.order_item_count(), 0);
}

#[test]
fn failed_compensation_still_returns_item_error() {
    let f = fixture();
    let a = f.storefront.create_product(candle_form("A", 10.0, 1), None).unwrap();
    f.storage.fail_order_items(true);
    f.storage.fail_order_delete(true);

    let err = f
        .storefront
        .submit_order(CheckoutRequest {
            contact: contact(),
            items: vec![line(&a, 1)],
        })
        .unwrap_err();
    assert!(err.to_string().contains("insert_order_items"));
    assert_eq!(f.storage.order_count(), 1);
}

// ─── Orders ─────────────────────────────────────────────────────────────────

#[test]
fn customer_lookup_normalizes_email_and_tracking() {
    let f = fixture();
    let a = f.storefront.create_product(candle_form("A", 10.0, 1), None).unwrap();
    let placed = f
        .storefront
        .submit_order(CheckoutRequest {
            contact: contact(),
            items: vec![line(&a, 1)],
        })
        .unwrap();
    let id = placed.order.id;

    f.storefront.transition_order(&id, &OrderAction::Approve).unwrap();
    f.storefront.transition_order(&id, &OrderAction::Process).unwrap();
    let shipped = f
        .storefront
        .transition_order(
            &id,
            &OrderAction::Ship {
                tracking_link: "tracking.example.com/abc".into(),
            },
        )
        .unwrap();
    assert_eq!(shipped.tracking_link.as_deref(), Some("tracking.example.com/abc"));

    let views = f.storefront.customer_orders("ASHA@example.com ").unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].status_label, "Shipped");
    assert_eq!(
        views[0].tracking_url.as_deref(),
        Some("https://tracking.example.com/abc")
    );
}

#[test]
fn illegal_order_transition_is_refused() {
    let f = fixture();
    let a = f.storefront.create_product(candle_form("A", 10.0, 1), None).unwrap();
    let placed = f
        .storefront
        .submit_order(CheckoutRequest {
            contact: contact(),
            items: vec![line(&a, 1)],
        })
        .unwrap();
    let err = f
        .storefront
        .transition_order(&placed.order.id, &OrderAction::Deliver)
        .unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Workflow(WorkflowError::InvalidTransition { .. })
    ));
    assert!(matches!(
        f.storefront.transition_order("nope", &OrderAction::Approve),
        Err(StorefrontError::NotFound { .. })
    ));
}

#[test]
fn dashboard_revenue_skips_rejected_and_cancelled() {
    let f = fixture();
    let a = f.storefront.create_product(candle_form("A", 100.0, 1), None).unwrap();
    let mut ids = Vec::new();
    for qty in 1..=5 {
        let placed = f
            .storefront
            .submit_order(CheckoutRequest {
                contact: contact(),
                items: vec![line(&a, qty)],
            })
            .unwrap();
        ids.push(placed.order.id);
    }
    // 100 pending, 200 approved, 300 shipped, 400 rejected, 500 cancelled.
    f.storefront.transition_order(&ids[1], &OrderAction::Approve).unwrap();
    f.storefront.transition_order(&ids[2], &OrderAction::Approve).unwrap();
    f.storefront.transition_order(&ids[2], &OrderAction::Process).unwrap();
    f.storefront
        .transition_order(
            &ids[2],
            &OrderAction::Ship {
                tracking_link: "t.example/1".into(),
            },
        )
        .unwrap();
    f.storefront.transition_order(&ids[3], &OrderAction::Reject).unwrap();
    f.storefront.transition_order(&ids[4], &OrderAction::Cancel).unwrap();

    let stats = f.storefront.dashboard().unwrap();
    assert_eq!(stats.orders.total_revenue, 600.0);
    assert_eq!(stats.orders.total_orders, 5);
    assert_eq!(stats.orders.pending_orders, 1);
    assert_eq!(stats.total_products, 1);
    assert_eq!(f.storefront.pending_orders().unwrap().len(), 1);
}

// ─── Catalog ────────────────────────────────────────────────────────────────

#[test]
fn quilling_products_drop_fragrance() {
    let f = fixture();
    let mut form = candle_form("Swirl", 300.0, 2);
    form.category = ProductCategory::Quilling;
    let product = f.storefront.create_product(form, None).unwrap();
    assert_eq!(product.fragrance_type, None);

    let updated = f
        .storefront
        .update_product(
            &product.id,
            ProductUpdateForm {
                fragrance_type: Some("rose".into()),
                ..Default::default()
            },
            None,
        )
        .unwrap();
    assert_eq!(updated.fragrance_type, None);
}

#[test]
fn image_upload_failure_still_creates_product() {
    let f = fixture();
    f.blobs.fail_paths_containing("products/");
    let product = f
        .storefront
        .create_product(candle_form("A", 1.0, 1), Some(&image("a.png")))
        .unwrap();
    assert_eq!(product.image_url, None);
}

#[test]
fn image_upload_sets_public_url() {
    let f = fixture();
    let product = f
        .storefront
        .create_product(candle_form("A", 1.0, 1), Some(&image("a.png")))
        .unwrap();
    let url = product.image_url.unwrap();
    assert!(url.starts_with("memory://products/"));
    assert!(url.ends_with(".png"));
}

#[test]
fn bestsellers_are_active_and_capped() {
    let f = fixture();
    for i in 0..8 {
        let mut form = candle_form(&format!("B{i}"), 1.0, 1);
        form.is_bestseller = true;
        form.is_active = i != 0;
        f.storefront.create_product(form, None).unwrap();
    }
    let bestsellers = f.storefront.bestsellers().unwrap();
    assert_eq!(bestsellers.len(), 6);
    assert!(bestsellers.iter().all(|p| p.product.is_active));
    assert_eq!(bestsellers[0].product.name, "B7");
}

#[test]
fn deactivated_products_leave_the_storefront() {
    let f = fixture();
    let p = f.storefront.create_product(candle_form("A", 1.0, 1), None).unwrap();
    f.storefront.deactivate_product(&p.id).unwrap();
    assert!(f.storefront.active_products(None).unwrap().is_empty());
    assert_eq!(f.storefront.all_products().unwrap().len(), 1);
    assert!(matches!(
        f.storefront.catalog_product(&p.id),
        Err(StorefrontError::NotFound { .. })
    ));
}

#[test]
fn out_of_stock_offers_notification() {
    let f = fixture();
    let p = f.storefront.create_product(candle_form("A", 1.0, 0), None).unwrap();
    let listed = f.storefront.catalog_product(&p.id).unwrap();
    assert!(listed.out_of_stock);
    assert_eq!(listed.purchase_option, PurchaseOption::NotifyWhenAvailable);
}

#[test]
fn negative_stock_refused() {
    let f = fixture();
    let p = f.storefront.create_product(candle_form("A", 1.0, 1), None).unwrap();
    assert!(matches!(
        f.storefront.set_stock(&p.id, -1),
        Err(StorefrontError::Validation(_))
    ));
    assert_eq!(f.storefront.set_stock(&p.id, 0).unwrap().stock, 0);
}

#[test]
fn hard_delete_keeps_order_snapshot() {
    let f = fixture();
    let p = f.storefront.create_product(candle_form("A", 9.0, 1), None).unwrap();
    let placed = f
        .storefront
        .submit_order(CheckoutRequest {
            contact: contact(),
            items: vec![line(&p, 1)],
        })
        .unwrap();
    f.storefront.delete_product(&p.id).unwrap();
    assert!(f.storage.get_product(&p.id).unwrap().is_none());

    let detail = f.storefront.order_with_items(&placed.order.id).unwrap();
    assert_eq!(detail.items[0].product_id, None);
    assert_eq!(detail.items[0].product_name, "A");
}

// ─── Stock requests ─────────────────────────────────────────────────────────

fn stock_form(product_id: &str) -> StockRequestForm {
    StockRequestForm {
        product_id: product_id.to_string(),
        user_email: " Ravi@Example.com".into(),
        user_name: Some("  ".into()),
        quantity: None,
    }
}

#[test]
fn stock_request_only_when_sold_out() {
    let f = fixture();
    let p = f.storefront.create_product(candle_form("A", 1.0, 3), None).unwrap();
    assert!(matches!(
        f.storefront.request_stock(&stock_form(&p.id)),
        Err(StorefrontError::Workflow(WorkflowError::ProductInStock { stock: 3, .. }))
    ));

    f.storefront.set_stock(&p.id, 0).unwrap();
    let request = f.storefront.request_stock(&stock_form(&p.id)).unwrap();
    assert_eq!(request.user_email, "ravi@example.com");
    assert_eq!(request.user_name, "Customer");
    assert_eq!(request.quantity, 1);
    assert_eq!(request.status, StockRequestStatus::Pending);

    // Repeats are separate rows.
    f.storefront.request_stock(&stock_form(&p.id)).unwrap();
    let listed = f.storefront.stock_requests().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].product_name.as_deref(), Some("A"));
}

#[test]
fn stock_request_for_unknown_product_not_found() {
    let f = fixture();
    assert!(matches!(
        f.storefront.request_stock(&stock_form("missing")),
        Err(StorefrontError::NotFound { .. })
    ));
}

#[test]
fn stock_request_advances_in_order() {
    let f = fixture();
    let p = f.storefront.create_product(candle_form("A", 1.0, 0), None).unwrap();
    let r = f.storefront.request_stock(&stock_form(&p.id)).unwrap();
    assert!(f
        .storefront
        .advance_stock_request(&r.id, StockRequestAction::Fulfill)
        .is_err());
    let r = f
        .storefront
        .advance_stock_request(&r.id, StockRequestAction::Notify)
        .unwrap();
    assert_eq!(r.status, StockRequestStatus::Notified);
    let r = f
        .storefront
        .advance_stock_request(&r.id, StockRequestAction::Fulfill)
        .unwrap();
    assert_eq!(r.status, StockRequestStatus::Fulfilled);
}

// ─── Custom orders ──────────────────────────────────────────────────────────

fn custom_form() -> CustomOrderForm {
    CustomOrderForm {
        user_email: "Meera@Example.com".into(),
        user_name: "Meera".into(),
        user_phone: None,
        description: "Wedding favours".into(),
        budget_range: Some("".into()),
        deadline: Some("2024-12-01".into()),
    }
}

#[test]
fn custom_order_skips_failed_uploads() {
    let f = fixture();
    f.blobs.fail_paths_containing(".bad");
    let order = f
        .storefront
        .submit_custom_order(
            custom_form(),
            &[image("one.jpg"), image("two.bad"), image("three.png")],
        )
        .unwrap();
    let urls = order.reference_images.unwrap();
    assert_eq!(urls.len(), 2);
    assert!(urls.iter().all(|u| u.starts_with("memory://custom-orders/")));
    assert_eq!(order.budget_range, None);
    assert_eq!(order.deadline.unwrap().to_string(), "2024-12-01");
    assert_eq!(order.status, CustomOrderStatus::Pending);
}

#[test]
fn custom_order_without_images_stores_none() {
    let f = fixture();
    f.blobs.fail_paths_containing("custom-orders/");
    let order = f
        .storefront
        .submit_custom_order(custom_form(), &[image("one.jpg")])
        .unwrap();
    assert_eq!(order.reference_images, None);
}

#[test]
fn bad_deadline_is_a_validation_error() {
    let f = fixture();
    let mut form = custom_form();
    form.deadline = Some("next friday".into());
    assert!(matches!(
        f.storefront.submit_custom_order(form, &[]),
        Err(StorefrontError::Validation(_))
    ));
}

#[test]
fn quote_writes_price_and_notes_with_status() {
    let f = fixture();
    let order = f.storefront.submit_custom_order(custom_form(), &[]).unwrap();
    let quoted = f
        .storefront
        .transition_custom_order(
            &order.id,
            &CustomOrderAction::Quote {
                quoted_price: 2400.0,
                admin_notes: Some(" 50 favours ".into()),
            },
        )
        .unwrap();
    assert_eq!(quoted.status, CustomOrderStatus::Quoted);
    assert_eq!(quoted.quoted_price, Some(2400.0));
    assert_eq!(quoted.admin_notes.as_deref(), Some("50 favours"));

    let mine = f.storefront.customer_custom_orders("meera@example.com").unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(
        f.storefront.dashboard().unwrap().pending_custom_orders,
        0
    );
}
