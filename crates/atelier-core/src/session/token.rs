//! Signed admin session tokens.
//!
//! Format: `base64url(expiry_millis) "." base64url(mac)` where `mac` is a
//! keyed BLAKE3 hash of the payload bytes. The key is derived from the
//! configured secret so the raw secret never touches the MAC directly.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

const KEY_CONTEXT: &str = "atelier 2024-06 admin session token v1";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed session token")]
    Malformed,
    #[error("session token signature mismatch")]
    BadSignature,
    #[error("session token expired")]
    Expired,
}

/// A freshly issued token and its expiry (epoch millis).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

#[derive(Clone)]
pub struct SessionSigner {
    key: [u8; 32],
    ttl: Duration,
}

impl SessionSigner {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_hours(secret: &str, hours: u64) -> Self {
        // Capped at ten years.
        let hours = hours.min(24 * 365 * 10) as i64;
        Self::new(secret, Duration::hours(hours))
    }

    pub fn issue_at(&self, now: DateTime<Utc>) -> IssuedToken {
        let expires_at = (now + self.ttl).timestamp_millis();
        let payload = expires_at.to_string();
        let mac = blake3::keyed_hash(&self.key, payload.as_bytes());
        IssuedToken {
            token: format!(
                "{}.{}",
                URL_SAFE_NO_PAD.encode(payload.as_bytes()),
                URL_SAFE_NO_PAD.encode(mac.as_bytes())
            ),
            expires_at,
        }
    }

    pub fn issue(&self) -> IssuedToken {
        self.issue_at(Utc::now())
    }

    /// Check signature, then expiry. Returns the expiry on success.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<i64, TokenError> {
        let (payload_b64, mac_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;
        let mac_bytes: [u8; 32] = URL_SAFE_NO_PAD
            .decode(mac_b64)
            .map_err(|_| TokenError::Malformed)?
            .try_into()
            .map_err(|_| TokenError::Malformed)?;

        // `Hash` equality is constant-time.
        let expected = blake3::keyed_hash(&self.key, &payload);
        if expected != blake3::Hash::from(mac_bytes) {
            return Err(TokenError::BadSignature);
        }

        let expires_at: i64 = std::str::from_utf8(&payload)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(TokenError::Malformed)?;
        if now.timestamp_millis() > expires_at {
            return Err(TokenError::Expired);
        }
        Ok(expires_at)
    }

    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        self.verify_at(token, Utc::now())
    }
}

/// Compare a submitted password with the configured one without leaking
/// timing on the first differing byte.
pub fn verify_password(submitted: &str, expected: &str) -> bool {
    blake3::hash(submitted.as_bytes()) == blake3::hash(expected.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_compare() {
        assert!(verify_password("hunter2", "hunter2"));
        assert!(!verify_password("hunter3", "hunter2"));
        assert!(!verify_password("", "hunter2"));
    }

    #[test]
    fn garbage_is_malformed() {
        let signer = SessionSigner::from_hours("s3cret", 24);
        assert_eq!(signer.verify("nodot"), Err(TokenError::Malformed));
        assert_eq!(signer.verify("!!.??"), Err(TokenError::Malformed));
    }
}
