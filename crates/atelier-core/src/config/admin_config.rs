//! Admin gate configuration.

use serde::{Deserialize, Serialize};

pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";
pub const ADMIN_SESSION_SECRET_ENV: &str = "ADMIN_SESSION_SECRET";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared admin secret. `None` makes every verification fail.
    pub password: Option<String>,
    /// Key material for signing session tokens. Falls back to the password.
    pub session_secret: Option<String>,
    pub session_hours: u64,
}

impl AdminConfig {
    /// Apply `ADMIN_PASSWORD` / `ADMIN_SESSION_SECRET` from the given lookup.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(password) = lookup(ADMIN_PASSWORD_ENV).filter(|p| !p.is_empty()) {
            self.password = Some(password);
        }
        if let Some(secret) = lookup(ADMIN_SESSION_SECRET_ENV).filter(|s| !s.is_empty()) {
            self.session_secret = Some(secret);
        }
    }

    /// Secret used to sign session tokens, if any is configured.
    pub fn signing_secret(&self) -> Option<&str> {
        self.session_secret
            .as_deref()
            .or(self.password.as_deref())
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: None,
            session_secret: None,
            session_hours: 24,
        }
    }
}
