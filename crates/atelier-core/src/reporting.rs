//! Order statistics for the admin dashboard.

use serde::Serialize;

use crate::workflow::OrderStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OrderStats {
    pub total_orders: usize,
    pub pending_orders: usize,
    /// Sum of `total_amount` over every order that is neither rejected nor cancelled.
    pub total_revenue: f64,
}

/// Aggregate `(status, total_amount)` pairs.
pub fn order_stats<I>(orders: I) -> OrderStats
where
    I: IntoIterator<Item = (OrderStatus, f64)>,
{
    orders
        .into_iter()
        .fold(OrderStats::default(), |mut stats, (status, amount)| {
            stats.total_orders += 1;
            if status == OrderStatus::Pending {
                stats.pending_orders += 1;
            }
            if status.counts_toward_revenue() {
                stats.total_revenue += amount;
            }
            stats
        })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub pending_custom_orders: usize,
    #[serde(flatten)]
    pub orders: OrderStats,
}
