//! Row helpers + per-table query modules.

pub mod custom_order_ops;
pub mod order_ops;
pub mod product_ops;
pub mod stock_request_ops;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use atelier_core::errors::StorageError;

use crate::to_storage_err;

/// Current time at the precision the database stores.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so text ordering matches time ordering.
pub(crate) fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}

/// Read column `idx`, mapping rusqlite errors.
pub(crate) fn col<T: rusqlite::types::FromSql>(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> Result<T, StorageError> {
    row.get(idx).map_err(|e| to_storage_err(e.to_string()))
}

/// Parse a status/category column through its `FromStr`.
pub(crate) fn parse_enum<T: std::str::FromStr>(
    table: &'static str,
    raw: &str,
) -> Result<T, StorageError>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| StorageError::CorruptRow {
        table,
        details: e.to_string(),
    })
}
