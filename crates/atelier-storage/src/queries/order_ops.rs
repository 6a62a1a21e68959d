//! Orders and their line items.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tracing::{debug, warn};
use uuid::Uuid;

use atelier_core::errors::StorageError;
use atelier_core::models::{NewOrder, NewOrderItem, Order, OrderItem};
use atelier_core::traits::storage::OrderFilter;
use atelier_core::workflow::{OrderStatus, OrderTransition};

use super::{col, fmt_ts, now, parse_enum, parse_ts};
use crate::to_storage_err;

const ORDER_COLUMNS: &str = "id, user_email, user_name, user_phone, shipping_address, status,
     tracking_link, total_amount, notes, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, order_id, product_id, product_name, product_price, quantity,
     is_custom_request, created_at";

pub fn insert_order(conn: &Connection, order: &NewOrder) -> Result<Order, StorageError> {
    let stamp = now();
    let c = &order.contact;
    let row = Order {
        id: Uuid::new_v4().to_string(),
        user_email: c.user_email.clone(),
        user_name: c.user_name.clone(),
        user_phone: c.user_phone.clone(),
        shipping_address: c.shipping_address.clone(),
        status: OrderStatus::Pending,
        tracking_link: None,
        total_amount: order.total_amount,
        notes: c.notes.clone(),
        created_at: stamp,
        updated_at: stamp,
    };

    conn.execute(
        "INSERT INTO orders (
            id, user_email, user_name, user_phone, shipping_address, status,
            tracking_link, total_amount, notes, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            row.id,
            row.user_email,
            row.user_name,
            row.user_phone,
            row.shipping_address,
            row.status.as_str(),
            row.tracking_link,
            row.total_amount,
            row.notes,
            fmt_ts(row.created_at),
            fmt_ts(row.updated_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(row)
}

/// All items in one transaction: either every row lands or none.
pub fn insert_order_items(
    conn: &Connection,
    order_id: &str,
    items: &[NewOrderItem],
) -> Result<Vec<OrderItem>, StorageError> {
    let stamp = now();
    let rows: Vec<OrderItem> = items
        .iter()
        .map(|item| OrderItem {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            product_id: Some(item.product_id.clone()),
            product_name: item.product_name.clone(),
            product_price: item.product_price,
            quantity: item.quantity,
            is_custom_request: false,
            created_at: stamp,
        })
        .collect();

    conn.execute_batch("SAVEPOINT order_items")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = rows.iter().try_for_each(|item| {
        conn.execute(
            "INSERT INTO order_items (
                id, order_id, product_id, product_name, product_price, quantity,
                is_custom_request, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.id,
                item.order_id,
                item.product_id,
                item.product_name,
                item.product_price,
                item.quantity,
                item.is_custom_request,
                fmt_ts(item.created_at),
            ],
        )
        .map(|_| ())
        .map_err(|e| to_storage_err(format!("insert order item {}: {e}", item.product_name)))
    });

    match result {
        Ok(()) => {
            conn.execute_batch("RELEASE order_items")
                .map_err(|e| to_storage_err(e.to_string()))?;
            debug!(order_id, count = rows.len(), "order items inserted");
            Ok(rows)
        }
        Err(e) => {
            if let Err(rollback) = conn.execute_batch("ROLLBACK TO order_items; RELEASE order_items") {
                warn!(order_id, error = %rollback, "rolling back order items failed");
            }
            Err(e)
        }
    }
}

/// Items go with the order via `ON DELETE CASCADE`.
pub fn delete_order(conn: &Connection, id: &str) -> Result<(), StorageError> {
    conn.execute("DELETE FROM orders WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_order(conn: &Connection, id: &str) -> Result<Option<Order>, StorageError> {
    let mut stmt = conn
        .prepare(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;

    stmt.query_row(params![id], |row| Ok(row_to_order(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .transpose()
}

pub fn list_order_items(conn: &Connection, order_id: &str) -> Result<Vec<OrderItem>, StorageError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ?1 ORDER BY rowid"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![order_id], |row| Ok(row_to_order_item(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(items)
}

pub fn list_orders(conn: &Connection, filter: &OrderFilter) -> Result<Vec<Order>, StorageError> {
    let mut sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE 1=1");
    let mut args: Vec<Value> = Vec::new();
    if let Some(email) = &filter.email {
        args.push(Value::Text(email.clone()));
        sql.push_str(&format!(" AND user_email = ?{}", args.len()));
    }
    if let Some(status) = filter.status {
        args.push(Value::Text(status.as_str().to_string()));
        sql.push_str(&format!(" AND status = ?{}", args.len()));
    }
    sql.push_str(" ORDER BY created_at DESC, rowid DESC");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(args), |row| Ok(row_to_order(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut orders = Vec::new();
    for row in rows {
        orders.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(orders)
}

/// Conditional on `transition.from`. Returns `None` when no row matched.
pub fn transition_order(
    conn: &Connection,
    id: &str,
    transition: &OrderTransition,
) -> Result<Option<Order>, StorageError> {
    let changed = conn
        .execute(
            "UPDATE orders
             SET status = ?1,
                 tracking_link = COALESCE(?2, tracking_link),
                 updated_at = ?3
             WHERE id = ?4 AND status = ?5",
            params![
                transition.to.as_str(),
                transition.tracking_link,
                fmt_ts(now()),
                id,
                transition.from.as_str(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if changed == 0 {
        return Ok(None);
    }
    get_order(conn, id)
}

pub fn order_totals(conn: &Connection) -> Result<Vec<(OrderStatus, f64)>, StorageError> {
    let mut stmt = conn
        .prepare("SELECT status, total_amount FROM orders")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut totals = Vec::new();
    for row in rows {
        let (status, amount) = row.map_err(|e| to_storage_err(e.to_string()))?;
        totals.push((parse_enum("orders", &status)?, amount));
    }
    Ok(totals)
}

pub(crate) fn row_to_order(row: &rusqlite::Row<'_>) -> Result<Order, StorageError> {
    let status: String = col(row, 5)?;
    let created_at: String = col(row, 9)?;
    let updated_at: String = col(row, 10)?;

    Ok(Order {
        id: col(row, 0)?,
        user_email: col(row, 1)?,
        user_name: col(row, 2)?,
        user_phone: col(row, 3)?,
        shipping_address: col(row, 4)?,
        status: parse_enum("orders", &status)?,
        tracking_link: col(row, 6)?,
        total_amount: col(row, 7)?,
        notes: col(row, 8)?,
        created_at: parse_ts(&created_at)?,
        updated_at: parse_ts(&updated_at)?,
    })
}

fn row_to_order_item(row: &rusqlite::Row<'_>) -> Result<OrderItem, StorageError> {
    let created_at: String = col(row, 7)?;

    Ok(OrderItem {
        id: col(row, 0)?,
        order_id: col(row, 1)?,
        product_id: col(row, 2)?,
        product_name: col(row, 3)?,
        product_price: col(row, 4)?,
        quantity: col(row, 5)?,
        is_custom_request: col(row, 6)?,
        created_at: parse_ts(&created_at)?,
    })
}
