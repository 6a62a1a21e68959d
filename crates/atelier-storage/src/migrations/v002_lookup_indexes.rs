//! v002: indexes for customer lookups, admin filters, and item joins.

use rusqlite::Connection;

use atelier_core::errors::StorageError;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_products_active_created
            ON products(is_active, created_at);
        CREATE INDEX IF NOT EXISTS idx_orders_email ON orders(user_email);
        CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status);
        CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items(order_id);
        CREATE INDEX IF NOT EXISTS idx_order_items_product ON order_items(product_id);
        CREATE INDEX IF NOT EXISTS idx_custom_orders_email ON custom_orders(user_email);
        CREATE INDEX IF NOT EXISTS idx_custom_orders_status ON custom_orders(status);
        CREATE INDEX IF NOT EXISTS idx_stock_requests_product ON stock_requests(product_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(())
}
