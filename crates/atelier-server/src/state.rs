//! Shared application state handed to every handler.

use std::path::Path;
use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use atelier_core::config::AdminConfig;
use atelier_core::session::SessionSigner;
use atelier_core::traits::{IBlobStorage, IStorefrontStorage};
use atelier_core::{Storefront, StorefrontConfig, StorefrontResult};
use atelier_storage::{FsBlobStore, StorageEngine};

use crate::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub storefront: Storefront,
    pub blobs: Arc<dyn IBlobStorage>,
    /// `None` when no admin secret is configured; every admin call is refused.
    pub signer: Option<SessionSigner>,
    pub admin_password: Option<String>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn IStorefrontStorage>,
        blobs: Arc<dyn IBlobStorage>,
        admin: &AdminConfig,
    ) -> Self {
        let admin_password = admin.password.clone().filter(|p| !p.is_empty());
        let signer = admin
            .signing_secret()
            .filter(|s| !s.is_empty())
            .map(|secret| SessionSigner::from_hours(secret, admin.session_hours));
        if signer.is_none() {
            warn!("no admin session secret; admin API is disabled");
        }
        Self {
            storefront: Storefront::new(storage, Arc::clone(&blobs)),
            blobs,
            signer,
            admin_password,
        }
    }

    /// Open the database and blob root named by the config.
    pub fn from_config(config: &StorefrontConfig) -> StorefrontResult<Self> {
        let engine = if config.storage.is_in_memory() {
            StorageEngine::open_in_memory()?
        } else {
            StorageEngine::open(Path::new(&config.storage.db_path))?
        };
        let blobs = FsBlobStore::from_config(&config.blob);
        info!(
            db = %config.storage.db_path,
            media = %blobs.root().display(),
            "storefront state ready"
        );
        Ok(Self::new(Arc::new(engine), Arc::new(blobs), &config.admin))
    }

    /// Run a storefront call on the blocking pool.
    pub async fn run<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Storefront) -> StorefrontResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let storefront = self.storefront.clone();
        web::block(move || f(&storefront))
            .await
            .map_err(|e| AppError::Blocking(e.to_string()))?
            .map_err(AppError::from)
    }
}
