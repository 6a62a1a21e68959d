use chrono::{DateTime, Utc};
use tracing::debug;

use crate::errors::StorefrontResult;
use crate::traits::IKeyValueStore;

pub const AUTHENTICATED_KEY: &str = "admin_authenticated";
pub const AUTH_EXPIRY_KEY: &str = "admin_auth_expiry";
pub const AUTH_TOKEN_KEY: &str = "admin_auth_token";

/// 24 hours.
pub const SESSION_DURATION_MS: i64 = 24 * 60 * 60 * 1000;

/// Device-local admin flag: `"true"` plus an epoch-millis expiry.
pub struct AdminSession<S: IKeyValueStore> {
    store: S,
}

impl<S: IKeyValueStore> AdminSession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a successful verification at `now`, optionally keeping the
    /// server-issued token alongside. Returns the expiry.
    pub fn set_authenticated_at(
        &self,
        now: DateTime<Utc>,
        token: Option<&str>,
    ) -> StorefrontResult<i64> {
        let expiry = now.timestamp_millis() + SESSION_DURATION_MS;
        self.store.set(AUTHENTICATED_KEY, "true")?;
        self.store.set(AUTH_EXPIRY_KEY, &expiry.to_string())?;
        match token {
            Some(token) => self.store.set(AUTH_TOKEN_KEY, token)?,
            None => self.store.remove(AUTH_TOKEN_KEY)?,
        }
        Ok(expiry)
    }

    pub fn set_authenticated(&self, token: Option<&str>) -> StorefrontResult<i64> {
        self.set_authenticated_at(Utc::now(), token)
    }

    /// Valid while `now <= expiry`. An expired or malformed flag is cleared.
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> StorefrontResult<bool> {
        if self.store.get(AUTHENTICATED_KEY)?.as_deref() != Some("true") {
            return Ok(false);
        }
        let expiry = self
            .store
            .get(AUTH_EXPIRY_KEY)?
            .and_then(|raw| raw.parse::<i64>().ok());
        match expiry {
            Some(expiry) if now.timestamp_millis() <= expiry => Ok(true),
            _ => {
                debug!("admin session expired");
                self.logout()?;
                Ok(false)
            }
        }
    }

    pub fn is_authenticated(&self) -> StorefrontResult<bool> {
        self.is_authenticated_at(Utc::now())
    }

    /// Stored token, only while the flag itself is valid.
    pub fn token_at(&self, now: DateTime<Utc>) -> StorefrontResult<Option<String>> {
        if !self.is_authenticated_at(now)? {
            return Ok(None);
        }
        Ok(self.store.get(AUTH_TOKEN_KEY)?)
    }

    pub fn logout(&self) -> StorefrontResult<()> {
        self.store.remove(AUTHENTICATED_KEY)?;
        self.store.remove(AUTH_EXPIRY_KEY)?;
        self.store.remove(AUTH_TOKEN_KEY)?;
        Ok(())
    }
}
