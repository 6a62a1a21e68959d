use tracing::info;

use super::uploads::ImagePrefix;
use super::Storefront;
use crate::errors::{StorefrontError, StorefrontResult, WorkflowError};
use crate::models::{normalize_email, CustomOrder, CustomOrderForm, ImageUpload};
use crate::traits::storage::CustomOrderFilter;
use crate::traits::ICustomOrderStorage;
use crate::workflow::{CustomOrderAction, CustomOrderStatus};

impl Storefront {
    /// Submit a commission request. Reference images are uploaded one by one;
    /// failed uploads are skipped.
    pub fn submit_custom_order(
        &self,
        form: CustomOrderForm,
        images: &[ImageUpload],
    ) -> StorefrontResult<CustomOrder> {
        form.clone().into_new_custom_order(Vec::new())?;
        let urls = self.upload_images(ImagePrefix::CustomOrders, images);
        let new_order = form.into_new_custom_order(urls)?;
        let order = self.storage.insert_custom_order(&new_order)?;
        info!(
            custom_order_id = %order.id,
            images = order.reference_images.as_ref().map_or(0, Vec::len),
            "custom order submitted"
        );
        Ok(order)
    }

    pub fn customer_custom_orders(&self, email: &str) -> StorefrontResult<Vec<CustomOrder>> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(StorefrontError::validation("email is required"));
        }
        Ok(self.storage.list_custom_orders(&CustomOrderFilter {
            email: Some(email),
            status: None,
        })?)
    }

    pub fn list_custom_orders(
        &self,
        status: Option<CustomOrderStatus>,
    ) -> StorefrontResult<Vec<CustomOrder>> {
        Ok(self.storage.list_custom_orders(&CustomOrderFilter {
            email: None,
            status,
        })?)
    }

    pub fn custom_order(&self, id: &str) -> StorefrontResult<CustomOrder> {
        self.storage
            .get_custom_order(id)?
            .ok_or_else(|| StorefrontError::not_found("custom order", id))
    }

    /// Apply an admin action. A quote writes status, price, and notes together.
    pub fn transition_custom_order(
        &self,
        id: &str,
        action: &CustomOrderAction,
    ) -> StorefrontResult<CustomOrder> {
        let current = self.custom_order(id)?;
        let transition = current.status.apply(action)?;
        let updated = self
            .storage
            .transition_custom_order(id, &transition)?
            .ok_or_else(|| WorkflowError::StaleStatus {
                entity: "custom order",
                id: id.to_string(),
                expected: transition.from.to_string(),
            })?;
        info!(
            custom_order_id = id,
            from = %transition.from,
            to = %transition.to,
            "custom order status changed"
        );
        Ok(updated)
    }
}
