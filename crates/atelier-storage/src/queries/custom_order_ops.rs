//! Custom (commission) orders.

use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use uuid::Uuid;

use atelier_core::errors::StorageError;
use atelier_core::models::{CustomOrder, NewCustomOrder};
use atelier_core::traits::storage::CustomOrderFilter;
use atelier_core::workflow::{CustomOrderStatus, CustomOrderTransition};

use super::{col, fmt_ts, now, parse_enum, parse_ts};
use crate::to_storage_err;

const COLUMNS: &str = "id, user_email, user_name, user_phone, description, reference_images,
     budget_range, deadline, status, admin_notes, quoted_price, created_at, updated_at";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn insert_custom_order(
    conn: &Connection,
    order: &NewCustomOrder,
) -> Result<CustomOrder, StorageError> {
    let stamp = now();
    let row = CustomOrder {
        id: Uuid::new_v4().to_string(),
        user_email: order.user_email.clone(),
        user_name: order.user_name.clone(),
        user_phone: order.user_phone.clone(),
        description: order.description.clone(),
        reference_images: order.reference_images.clone(),
        budget_range: order.budget_range.clone(),
        deadline: order.deadline,
        status: CustomOrderStatus::Pending,
        admin_notes: None,
        quoted_price: None,
        created_at: stamp,
        updated_at: stamp,
    };

    let images_json = row
        .reference_images
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO custom_orders (
            id, user_email, user_name, user_phone, description, reference_images,
            budget_range, deadline, status, admin_notes, quoted_price, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            row.id,
            row.user_email,
            row.user_name,
            row.user_phone,
            row.description,
            images_json,
            row.budget_range,
            row.deadline.map(|d| d.format(DATE_FORMAT).to_string()),
            row.status.as_str(),
            row.admin_notes,
            row.quoted_price,
            fmt_ts(row.created_at),
            fmt_ts(row.updated_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(row)
}

pub fn get_custom_order(conn: &Connection, id: &str) -> Result<Option<CustomOrder>, StorageError> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM custom_orders WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;

    stmt.query_row(params![id], |row| Ok(row_to_custom_order(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .transpose()
}

pub fn list_custom_orders(
    conn: &Connection,
    filter: &CustomOrderFilter,
) -> Result<Vec<CustomOrder>, StorageError> {
    let mut sql = format!("SELECT {COLUMNS} FROM custom_orders WHERE 1=1");
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
        .query_map(params_from_iter(args), |row| Ok(row_to_custom_order(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut orders = Vec::new();
    for row in rows {
        orders.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(orders)
}

/// Status, and for quotes the price and notes, in one conditional UPDATE.
/// A quote without notes keeps whatever notes were there.
pub fn transition_custom_order(
    conn: &Connection,
    id: &str,
    transition: &CustomOrderTransition,
) -> Result<Option<CustomOrder>, StorageError> {
    let (price, notes) = match &transition.quote {
        Some(quote) => (Some(quote.price), quote.admin_notes.clone()),
        None => (None, None),
    };

    let changed = conn
        .execute(
            "UPDATE custom_orders
             SET status = ?1,
                 quoted_price = COALESCE(?2, quoted_price),
                 admin_notes = COALESCE(?3, admin_notes),
                 updated_at = ?4
             WHERE id = ?5 AND status = ?6",
            params![
                transition.to.as_str(),
                price,
                notes,
                fmt_ts(now()),
                id,
                transition.from.as_str(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if changed == 0 {
        return Ok(None);
    }
    get_custom_order(conn, id)
}

fn row_to_custom_order(row: &rusqlite::Row<'_>) -> Result<CustomOrder, StorageError> {
    let images_json: Option<String> = col(row, 5)?;
    let deadline: Option<String> = col(row, 7)?;
    let status: String = col(row, 8)?;
    let created_at: String = col(row, 11)?;
    let updated_at: String = col(row, 12)?;

    let reference_images = images_json
        .as_deref()
        .map(|raw| serde_json::from_str::<Vec<String>>(raw))
        .transpose()
        .map_err(|e| StorageError::CorruptRow {
            table: "custom_orders",
            details: format!("reference_images: {e}"),
        })?;
    let deadline = deadline
        .as_deref()
        .map(|d| NaiveDate::parse_from_str(d, DATE_FORMAT))
        .transpose()
        .map_err(|e| StorageError::CorruptRow {
            table: "custom_orders",
            details: format!("deadline: {e}"),
        })?;

    Ok(CustomOrder {
        id: col(row, 0)?,
        user_email: col(row, 1)?,
        user_name: col(row, 2)?,
        user_phone: col(row, 3)?,
        description: col(row, 4)?,
        reference_images,
        budget_range: col(row, 6)?,
        deadline,
        status: parse_enum("custom_orders", &status)?,
        admin_notes: col(row, 9)?,
        quoted_price: col(row, 10)?,
        created_at: parse_ts(&created_at)?,
        updated_at: parse_ts(&updated_at)?,
    })
}
