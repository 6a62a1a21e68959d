pub mod admin_config;
pub mod blob_config;
pub mod observability_config;
pub mod server_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use admin_config::AdminConfig;
pub use blob_config::BlobConfig;
pub use observability_config::ObservabilityConfig;
pub use server_config::ServerConfig;
pub use storage_config::StorageConfig;

use crate::errors::{StorefrontError, StorefrontResult};

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "ATELIER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "atelier.toml";

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorefrontConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub blob: BlobConfig,
    pub admin: AdminConfig,
    pub observability: ObservabilityConfig,
}

impl StorefrontConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load from a file. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> StorefrontResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents)
                .map_err(|e| StorefrontError::Config(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("{} not found, using default config", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(StorefrontError::Config(format!("{}: {e}", path.display()))),
        }
    }

    /// Load from `$ATELIER_CONFIG` (or `atelier.toml`) and apply env overrides.
    pub fn load_from_env() -> StorefrontResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load(Path::new(&path))?;
        config.admin.apply_env_overrides(|key| std::env::var(key).ok());
        if config.admin.password.is_none() {
            warn!("no admin password configured; admin verification will fail");
        }
        Ok(config)
    }
}
