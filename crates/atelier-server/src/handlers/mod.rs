pub mod admin;
pub mod catalog;
pub mod custom_orders;
pub mod media;
pub mod orders;
pub mod stock_requests;

use std::str::FromStr;

use atelier_core::StorefrontError;

use crate::errors::AppResult;

/// Parse an optional `?status=` filter. Missing, blank, or `all` means no filter.
pub(crate) fn status_filter<T>(raw: Option<&str>) -> AppResult<Option<T>>
where
    T: FromStr<Err = StorefrontError>,
{
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(s) => Ok(Some(s.parse()?)),
    }
}
