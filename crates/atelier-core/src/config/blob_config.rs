//! Image bucket configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobConfig {
    /// Directory holding uploaded images.
    pub root_dir: String,
    /// Prefix for public URLs; uploaded paths are appended after a `/`.
    pub public_base_url: String,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            root_dir: "media".to_string(),
            public_base_url: "http://127.0.0.1:8080/media".to_string(),
        }
    }
}
