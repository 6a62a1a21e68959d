//! Back-in-stock requests.

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use atelier_core::errors::StorageError;
use atelier_core::models::{NewStockRequest, StockRequest, StockRequestWithProduct};
use atelier_core::workflow::StockRequestStatus;

use super::{col, fmt_ts, now, parse_enum, parse_ts};
use crate::to_storage_err;

pub fn insert_stock_request(
    conn: &Connection,
    request: &NewStockRequest,
) -> Result<StockRequest, StorageError> {
    let row = StockRequest {
        id: Uuid::new_v4().to_string(),
        product_id: request.product_id.clone(),
        user_email: request.user_email.clone(),
        user_name: request.user_name.clone(),
        quantity: request.quantity,
        status: StockRequestStatus::Pending,
        created_at: now(),
    };

    conn.execute(
        "INSERT INTO stock_requests (
            id, product_id, user_email, user_name, quantity, status, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            row.id,
            row.product_id,
            row.user_email,
            row.user_name,
            row.quantity,
            row.status.as_str(),
            fmt_ts(row.created_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(row)
}

pub fn get_stock_request(conn: &Connection, id: &str) -> Result<Option<StockRequest>, StorageError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, product_id, user_email, user_name, quantity, status, created_at
             FROM stock_requests WHERE id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    stmt.query_row(params![id], |row| Ok(row_to_stock_request(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .transpose()
}

/// Newest first, with the product name when the product still exists.
pub fn list_stock_requests(conn: &Connection) -> Result<Vec<StockRequestWithProduct>, StorageError> {
    let mut stmt = conn
        .prepare(
            "SELECT r.id, r.product_id, r.user_email, r.user_name, r.quantity, r.status,
                    r.created_at, p.name
             FROM stock_requests r
             LEFT JOIN products p ON p.id = r.product_id
             ORDER BY r.created_at DESC, r.rowid DESC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(row_to_stock_request(row).and_then(|request| {
                Ok(StockRequestWithProduct {
                    request,
                    product_name: col(row, 7)?,
                })
            }))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut requests = Vec::new();
    for row in rows {
        requests.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(requests)
}

pub fn transition_stock_request(
    conn: &Connection,
    id: &str,
    from: StockRequestStatus,
    to: StockRequestStatus,
) -> Result<Option<StockRequest>, StorageError> {
    let changed = conn
        .execute(
            "UPDATE stock_requests SET status = ?1 WHERE id = ?2 AND status = ?3",
            params![to.as_str(), id, from.as_str()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if changed == 0 {
        return Ok(None);
    }
    get_stock_request(conn, id)
}

fn row_to_stock_request(row: &rusqlite::Row<'_>) -> Result<StockRequest, StorageError> {
    let status: String = col(row, 5)?;
    let created_at: String = col(row, 6)?;

    Ok(StockRequest {
        id: col(row, 0)?,
        product_id: col(row, 1)?,
        user_email: col(row, 2)?,
        user_name: col(row, 3)?,
        quantity: col(row, 4)?,
        status: parse_enum("stock_requests", &status)?,
        created_at: parse_ts(&created_at)?,
    })
}
