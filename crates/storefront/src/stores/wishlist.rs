//! Wishlist store, persisted under `wishlist-storage`.

use furnish_core::{ProductId, WishlistItem};
use serde::{Deserialize, Serialize};

use super::{Persisted, PersistedState};
use crate::storage::StorageError;

/// Saved products, unique by product ID, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistState {
    items: Vec<WishlistItem>,
}

impl PersistedState for WishlistState {
    const KEY: &'static str = "wishlist-storage";
}

impl WishlistState {
    /// Save a product. No-op if it is already saved.
    pub fn add_item(&mut self, item: WishlistItem) {
        if !self.is_in_wishlist(&item.product_id) {
            self.items.push(item);
        }
    }

    /// Remove a product. Absent products are ignored.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|item| &item.product_id != product_id);
    }

    /// Whether a product is saved.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }

    /// Remove the product if saved, otherwise save it.
    ///
    /// Returns whether the product is saved afterwards.
    pub fn toggle_item(&mut self, item: WishlistItem) -> bool {
        if self.is_in_wishlist(&item.product_id) {
            self.remove_item(&item.product_id);
            false
        } else {
            self.add_item(item);
            true
        }
    }

    /// Remove every saved product.
    pub fn clear_wishlist(&mut self) {
        self.items.clear();
    }

    /// Saved products in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Number of saved products.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// The persisted wishlist.
pub type WishlistStore = Persisted<WishlistState>;

impl Persisted<WishlistState> {
    /// See [`WishlistState::add_item`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn add_item(&mut self, item: WishlistItem) -> Result<(), StorageError> {
        self.update(|wishlist| wishlist.add_item(item))
    }

    /// See [`WishlistState::remove_item`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<(), StorageError> {
        self.update(|wishlist| wishlist.remove_item(product_id))
    }

    /// See [`WishlistState::toggle_item`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn toggle_item(&mut self, item: WishlistItem) -> Result<bool, StorageError> {
        self.update(|wishlist| wishlist.toggle_item(item))
    }

    /// See [`WishlistState::clear_wishlist`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn clear_wishlist(&mut self) -> Result<(), StorageError> {
        self.update(WishlistState::clear_wishlist)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStorage;

    fn item(id: &str) -> WishlistItem {
        WishlistItem::new(id, format!("Item {id}"), id, Decimal::new(10_000, 0), "")
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = WishlistState::default();
        wishlist.add_item(item("a"));
        let mut duplicate = item("a");
        duplicate.name = "Renamed".into();
        wishlist.add_item(duplicate);
        assert_eq!(wishlist.item_count(), 1);
        assert_eq!(wishlist.items()[0].name, "Item a");
    }

    #[test]
    fn test_toggle_twice_restores_prior_state() {
        let mut wishlist = WishlistState::default();
        wishlist.add_item(item("a"));
        wishlist.add_item(item("b"));

        for id in ["a", "b", "c"] {
            let before = wishlist.clone();
            let first = wishlist.toggle_item(item(id));
            let second = wishlist.toggle_item(item(id));
            assert_ne!(first, second);
            if id == "c" {
                assert_eq!(wishlist, before);
            } else {
                assert!(wishlist.is_in_wishlist(&id.into()));
                assert_eq!(wishlist.item_count(), before.item_count());
            }
        }
    }

    #[test]
    fn test_remove_and_clear() {
        let mut wishlist = WishlistState::default();
        wishlist.add_item(item("a"));
        wishlist.add_item(item("b"));
        wishlist.remove_item(&"a".into());
        wishlist.remove_item(&"zzz".into());
        assert!(!wishlist.is_in_wishlist(&"a".into()));
        assert_eq!(wishlist.item_count(), 1);
        wishlist.clear_wishlist();
        assert_eq!(wishlist.item_count(), 0);
    }

    #[test]
    fn test_store_persists_toggle() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = WishlistStore::load(storage.clone()).unwrap();
        assert!(store.toggle_item(item("a")).unwrap());

        let reloaded = WishlistStore::load(storage.clone()).unwrap();
        assert!(reloaded.state().is_in_wishlist(&"a".into()));

        assert!(!store.toggle_item(item("a")).unwrap());
        let reloaded = WishlistStore::load(storage).unwrap();
        assert_eq!(reloaded.state().item_count(), 0);
    }
}
