use super::Storefront;
use crate::errors::StorefrontResult;
use crate::reporting::{order_stats, DashboardStats};
use crate::traits::storage::CustomOrderFilter;
use crate::traits::{ICatalogStorage, ICustomOrderStorage, IOrderStorage};
use crate::workflow::CustomOrderStatus;

impl Storefront {
    pub fn dashboard(&self) -> StorefrontResult<DashboardStats> {
        let total_products = self.storage.count_products()?;
        let pending_custom_orders = self
            .storage
            .list_custom_orders(&CustomOrderFilter {
                email: None,
                status: Some(CustomOrderStatus::Pending),
            })?
            .len();
        let orders = order_stats(self.storage.order_totals()?);
        Ok(DashboardStats {
            total_products,
            pending_custom_orders,
            orders,
        })
    }
}
