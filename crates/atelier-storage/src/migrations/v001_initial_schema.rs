//! v001: catalog, orders, order items, custom orders, stock requests.

use rusqlite::Connection;

use atelier_core::errors::StorageError;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS products (
            id             TEXT PRIMARY KEY,
            name           TEXT NOT NULL,
            price          REAL NOT NULL CHECK (price >= 0),
            description    TEXT,
            category       TEXT NOT NULL CHECK (category IN ('candle', 'quilling')),
            fragrance_type TEXT,
            image_url      TEXT,
            stock          INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
            is_bestseller  INTEGER NOT NULL DEFAULT 0,
            is_active      INTEGER NOT NULL DEFAULT 1,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS orders (
            id               TEXT PRIMARY KEY,
            user_email       TEXT NOT NULL,
            user_name        TEXT NOT NULL,
            user_phone       TEXT,
            shipping_address TEXT NOT NULL,
            status           TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'approved', 'rejected', 'processing',
                                  'shipped', 'delivered', 'cancelled')),
            tracking_link    TEXT,
            total_amount     REAL NOT NULL,
            notes            TEXT,
            created_at       TEXT NOT NULL,
            updated_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS order_items (
            id                TEXT PRIMARY KEY,
            order_id          TEXT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            product_id        TEXT REFERENCES products(id) ON DELETE SET NULL,
            product_name      TEXT NOT NULL,
            product_price     REAL NOT NULL,
            quantity          INTEGER NOT NULL CHECK (quantity >= 1),
            is_custom_request INTEGER NOT NULL DEFAULT 0,
            created_at        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS custom_orders (
            id               TEXT PRIMARY KEY,
            user_email       TEXT NOT NULL,
            user_name        TEXT NOT NULL,
            user_phone       TEXT,
            description      TEXT NOT NULL,
            reference_images TEXT,
            budget_range     TEXT,
            deadline         TEXT,
            status           TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'reviewed', 'quoted', 'accepted',
                                  'in_progress', 'completed', 'rejected')),
            admin_notes      TEXT,
            quoted_price     REAL,
            created_at       TEXT NOT NULL,
            updated_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS stock_requests (
            id         TEXT PRIMARY KEY,
            product_id TEXT NOT NULL,
            user_email TEXT NOT NULL,
            user_name  TEXT NOT NULL,
            quantity   INTEGER NOT NULL DEFAULT 1 CHECK (quantity >= 1),
            status     TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'notified', 'fulfilled')),
            created_at TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(())
}
