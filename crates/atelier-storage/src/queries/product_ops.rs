//! Insert, get, list, patch, delete for products.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use uuid::Uuid;

use atelier_core::errors::StorageError;
use atelier_core::models::{NewProduct, Product, ProductPatch};
use atelier_core::traits::storage::ProductFilter;

use super::{col, fmt_ts, now, parse_enum, parse_ts};
use crate::to_storage_err;

const PRODUCT_COLUMNS: &str = "id, name, price, description, category, fragrance_type, image_url,
     stock, is_bestseller, is_active, created_at, updated_at";

pub fn insert_product(conn: &Connection, product: &NewProduct) -> Result<Product, StorageError> {
    let stamp = now();
    let row = Product {
        id: Uuid::new_v4().to_string(),
        name: product.name.clone(),
        price: product.price,
        description: product.description.clone(),
        category: product.category,
        fragrance_type: product.fragrance_type.clone(),
        image_url: product.image_url.clone(),
        stock: product.stock,
        is_bestseller: product.is_bestseller,
        is_active: product.is_active,
        created_at: stamp,
        updated_at: stamp,
    };

    conn.execute(
        "INSERT INTO products (
            id, name, price, description, category, fragrance_type, image_url,
            stock, is_bestseller, is_active, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            row.id,
            row.name,
            row.price,
            row.description,
            row.category.as_str(),
            row.fragrance_type,
            row.image_url,
            row.stock,
            row.is_bestseller,
            row.is_active,
            fmt_ts(row.created_at),
            fmt_ts(row.updated_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(row)
}

pub fn get_product(conn: &Connection, id: &str) -> Result<Option<Product>, StorageError> {
    let mut stmt = conn
        .prepare(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;

    stmt.query_row(params![id], |row| Ok(row_to_product(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .transpose()
}

/// Newest first; rowid breaks ties between rows created in the same microsecond.
pub fn list_products(
    conn: &Connection,
    filter: &ProductFilter,
) -> Result<Vec<Product>, StorageError> {
    let mut sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE 1=1");
    let mut args: Vec<Value> = Vec::new();
    if filter.active_only {
        sql.push_str(" AND is_active = 1");
    }
    if filter.bestsellers_only {
        sql.push_str(" AND is_bestseller = 1");
    }
    if let Some(category) = filter.category {
        args.push(Value::Text(category.as_str().to_string()));
        sql.push_str(&format!(" AND category = ?{}", args.len()));
    }
    sql.push_str(" ORDER BY created_at DESC, rowid DESC");
    if let Some(limit) = filter.limit {
        args.push(Value::Integer(limit as i64));
        sql.push_str(&format!(" LIMIT ?{}", args.len()));
    }

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(args), |row| Ok(row_to_product(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut products = Vec::new();
    for row in rows {
        products.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(products)
}

/// Apply the set columns of `patch` and refresh `updated_at`.
pub fn update_product(
    conn: &Connection,
    id: &str,
    patch: &ProductPatch,
) -> Result<Product, StorageError> {
    let mut sets: Vec<&str> = Vec::new();
    let mut args: Vec<Value> = Vec::new();
    let mut push = |column: &'static str, value: Value| {
        sets.push(column);
        args.push(value);
    };

    if let Some(name) = &patch.name {
        push("name", Value::Text(name.clone()));
    }
    if let Some(price) = patch.price {
        push("price", Value::Real(price));
    }
    if let Some(description) = &patch.description {
        push("description", opt_text(description));
    }
    if let Some(category) = patch.category {
        push("category", Value::Text(category.as_str().to_string()));
    }
    if let Some(fragrance) = &patch.fragrance_type {
        push("fragrance_type", opt_text(fragrance));
    }
    if let Some(image_url) = &patch.image_url {
        push("image_url", Value::Text(image_url.clone()));
    }
    if let Some(stock) = patch.stock {
        push("stock", Value::Integer(stock));
    }
    if let Some(flag) = patch.is_bestseller {
        push("is_bestseller", Value::Integer(flag as i64));
    }
    if let Some(flag) = patch.is_active {
        push("is_active", Value::Integer(flag as i64));
    }
    push("updated_at", Value::Text(fmt_ts(now())));

    let assignments: Vec<String> = sets
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ?{}", i + 1))
        .collect();
    args.push(Value::Text(id.to_string()));
    let sql = format!(
        "UPDATE products SET {} WHERE id = ?{}",
        assignments.join(", "),
        args.len()
    );

    let changed = conn
        .execute(&sql, params_from_iter(args))
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(StorageError::RowNotFound {
            table: "products",
            id: id.to_string(),
        });
    }

    get_product(conn, id)?.ok_or_else(|| StorageError::RowNotFound {
        table: "products",
        id: id.to_string(),
    })
}

/// Order items keep their snapshot; the FK sets their product_id to NULL.
pub fn delete_product(conn: &Connection, id: &str) -> Result<(), StorageError> {
    conn.execute("DELETE FROM products WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn count_products(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

fn opt_text(value: &Option<String>) -> Value {
    match value {
        Some(text) => Value::Text(text.clone()),
        None => Value::Null,
    }
}

pub(crate) fn row_to_product(row: &rusqlite::Row<'_>) -> Result<Product, StorageError> {
    let category: String = col(row, 4)?;
    let created_at: String = col(row, 10)?;
    let updated_at: String = col(row, 11)?;

    Ok(Product {
        id: col(row, 0)?,
        name: col(row, 1)?,
        price: col(row, 2)?,
        description: col(row, 3)?,
        category: parse_enum("products", &category)?,
        fragrance_type: col(row, 5)?,
        image_url: col(row, 6)?,
        stock: col(row, 7)?,
        is_bestseller: col(row, 8)?,
        is_active: col(row, 9)?,
        created_at: parse_ts(&created_at)?,
        updated_at: parse_ts(&updated_at)?,
    })
}
