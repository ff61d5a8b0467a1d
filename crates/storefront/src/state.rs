//! Session state shared by everything that needs a store or the CMS client.

use std::sync::Arc;

use crate::cms::CmsClient;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::storage::{FileStorage, Storage};
use crate::stores::{AddressStore, CartStore, PreferencesStore, WishlistStore};

/// Configuration, the storage port and the CMS client for one session.
///
/// Cheaply cloneable via `Arc`. Stores are loaded on demand and are owned by
/// the caller; two loads of the same store see the same snapshot.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storage: Arc<dyn Storage>,
    cms: CmsClient,
}

impl AppState {
    /// Build state backed by snapshot files under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the HTTP
    /// client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(config.data_dir.clone())?);
        Self::with_storage(config, storage)
    }

    /// Build state over an explicit storage port.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn Storage>) -> Result<Self> {
        let cms = CmsClient::new(&config.cms)?;
        tracing::debug!(data_dir = %config.data_dir.display(), "Session state ready");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                cms,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.inner.storage)
    }

    /// Get a reference to the CMS API client.
    #[must_use]
    pub fn cms(&self) -> &CmsClient {
        &self.inner.cms
    }

    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read.
    pub fn cart(&self) -> Result<CartStore> {
        Ok(CartStore::load(self.storage())?)
    }

    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read.
    pub fn wishlist(&self) -> Result<WishlistStore> {
        Ok(WishlistStore::load(self.storage())?)
    }

    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read.
    pub fn addresses(&self) -> Result<AddressStore> {
        Ok(AddressStore::load(self.storage())?)
    }

    /// # Errors
    ///
    /// Returns an error if a snapshot cannot be read.
    pub fn preferences(&self) -> Result<PreferencesStore> {
        Ok(PreferencesStore::load(self.storage())?)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("data_dir", &self.inner.config.data_dir)
            .field("cms", &self.inner.cms)
            .finish_non_exhaustive()
    }
}
