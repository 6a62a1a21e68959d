//! Carrier tracking links as shown to customers.

/// Give a stored tracking link a URI scheme for rendering.
///
/// Links already starting with `http://` or `https://` are returned as-is;
/// anything else gets `https://` prepended. The stored value is never
/// rewritten, only what the customer sees.
pub fn customer_tracking_url(link: &str) -> String {
    if link.is_empty() || link.starts_with("http://") || link.starts_with("https://") {
        return link.to_string();
    }
    format!("https://{link}")
}
