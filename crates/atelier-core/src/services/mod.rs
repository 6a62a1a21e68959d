//! Storefront workflows over the storage and blob traits.
//!
//! `Storefront` is cheap to clone and fully synchronous; the HTTP layer runs
//! each call on the blocking pool.

mod catalog;
mod checkout;
mod custom_orders;
mod dashboard;
mod orders;
mod stock_requests;
mod uploads;

use std::sync::Arc;

use crate::traits::{IBlobStorage, IStorefrontStorage};

pub use catalog::BESTSELLER_LIMIT;
pub use checkout::CheckoutRequest;
pub use uploads::{image_path, ImagePrefix};

#[derive(Clone)]
pub struct Storefront {
    storage: Arc<dyn IStorefrontStorage>,
    blobs: Arc<dyn IBlobStorage>,
}

impl Storefront {
    pub fn new(storage: Arc<dyn IStorefrontStorage>, blobs: Arc<dyn IBlobStorage>) -> Self {
        Self { storage, blobs }
    }
}
