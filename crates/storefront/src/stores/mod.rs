//! Client-side commerce stores.
//!
//! # Architecture
//!
//! Each store is split in two:
//!
//! - a plain state type (`CartState`, `WishlistState`, `AddressBook`, ...)
//!   whose methods are the pure state transitions, and
//! - [`Persisted<S>`], which owns that state together with an injected
//!   [`Storage`] port and writes a snapshot after every mutation.
//!
//! Stores are ordinary values created per session, not global singletons.
//! They are independent of each other: clearing the cart does not touch
//! addresses or payment state. Checkout reads them separately (see
//! [`crate::checkout`]).
//!
//! The payment flow store is ephemeral and is used directly as
//! [`PaymentState`].

pub mod address;
pub mod cart;
pub mod payment;
pub mod preferences;
pub mod wishlist;

pub use address::{AddressBook, AddressStore};
pub use cart::{CartState, CartStore};
pub use payment::PaymentState;
pub use preferences::{PopupDismissal, PreferencesStore, SidebarState};
pub use wishlist::{WishlistState, WishlistStore};

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::storage::{Snapshot, Storage, StorageError};

/// State that is persisted under a fixed storage key.
pub trait PersistedState: Serialize + DeserializeOwned + Default {
    /// Storage key the snapshot lives under.
    const KEY: &'static str;

    /// Snapshot version. Snapshots written with another version are discarded.
    const VERSION: u32 = 0;

    /// Restore invariants on state read back from a snapshot, which may have
    /// been edited by hand or written by an older build.
    fn normalize(&mut self) {}
}

/// A store: state plus the storage it is mirrored to.
pub struct Persisted<S> {
    state: S,
    storage: Arc<dyn Storage>,
}

impl<S: PersistedState> Persisted<S> {
    /// Load the store from `storage`, starting empty when no usable snapshot
    /// exists.
    ///
    /// A snapshot that cannot be decoded, or that was written with a different
    /// version, is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage itself cannot be read.
    pub fn load(storage: Arc<dyn Storage>) -> Result<Self, StorageError> {
        let state = match storage.get_item(S::KEY)? {
            None => S::default(),
            Some(raw) => match serde_json::from_str::<Snapshot<S>>(&raw) {
                Ok(snapshot) if snapshot.version == S::VERSION => {
                    debug!(key = S::KEY, "Loaded persisted snapshot");
                    let mut state = snapshot.state;
                    state.normalize();
                    state
                }
                Ok(snapshot) => {
                    warn!(
                        key = S::KEY,
                        found = snapshot.version,
                        expected = S::VERSION,
                        "Discarding snapshot with unknown version"
                    );
                    S::default()
                }
                Err(e) => {
                    warn!(key = S::KEY, error = %e, "Discarding unreadable snapshot");
                    S::default()
                }
            },
        };

        Ok(Self { state, storage })
    }

    /// Read-only view of the current state.
    #[must_use]
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Apply a transition and write the resulting snapshot.
    ///
    /// The in-memory state keeps the transition even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or written.
    pub fn update<R>(&mut self, transition: impl FnOnce(&mut S) -> R) -> Result<R, StorageError> {
        let result = transition(&mut self.state);
        self.save()?;
        Ok(result)
    }

    /// Delete the persisted snapshot and reset to the initial state.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be removed.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.state = S::default();
        self.storage.remove_item(S::KEY)
    }

    fn save(&self) -> Result<(), StorageError> {
        let snapshot = Snapshot {
            state: &self.state,
            version: S::VERSION,
        };
        let json = serde_json::to_string(&snapshot).map_err(|source| StorageError::Serialize {
            key: S::KEY.to_string(),
            source,
        })?;
        self.storage.set_item(S::KEY, &json)
    }
}

impl<S: core::fmt::Debug> core::fmt::Debug for Persisted<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Persisted")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
