//! Shopping cart store, persisted under `furniture-cart`.

use furnish_core::{CartItem, GuestInfo, Price, ProductId};
use serde::{Deserialize, Serialize};

use super::{Persisted, PersistedState};
use crate::storage::StorageError;

/// Cart contents and optional guest-checkout details.
///
/// Invariants: product IDs are unique across `items`, and every quantity is
/// at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartItem>,
    #[serde(default)]
    guest_info: Option<GuestInfo>,
}

impl PersistedState for CartState {
    const KEY: &'static str = "furniture-cart";

    /// Drop empty lines and merge repeated products.
    fn normalize(&mut self) {
        let mut lines: Vec<CartItem> = Vec::with_capacity(self.items.len());
        for line in self.items.drain(..) {
            if line.quantity == 0 {
                continue;
            }
            match lines.iter_mut().find(|l| l.product_id == line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => lines.push(line),
            }
        }
        self.items = lines;
    }
}

impl CartState {
    /// Add one unit of a product.
    ///
    /// A product already in the cart has its quantity incremented; otherwise a
    /// new line is inserted at quantity 1 regardless of `item.quantity`.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(line) = self.line_mut(&item.product_id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem { quantity: 1, ..item });
        }
    }

    /// Remove a product's line. Absent products are ignored.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|line| &line.product_id != product_id);
    }

    /// Set a line's quantity. Zero or negative quantities remove the line.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    /// Remove every line. Guest details are kept.
    pub fn clear_cart(&mut self) {
        self.items.clear();
    }

    /// Record guest-checkout details, replacing any previous record.
    pub fn set_guest_info(&mut self, info: GuestInfo) {
        self.guest_info = Some(info);
    }

    /// Forget guest-checkout details.
    pub fn clear_guest_info(&mut self) {
        self.guest_info = None;
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|line| &line.product_id == product_id)
    }

    /// Guest-checkout details, if recorded.
    #[must_use]
    pub const fn guest_info(&self) -> Option<&GuestInfo> {
        self.guest_info.as_ref()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price times quantity across all lines.
    ///
    /// `None` when the total is too large to represent.
    #[must_use]
    pub fn total_price(&self) -> Option<Price> {
        self.items
            .iter()
            .try_fold(Price::default(), |acc, line| acc.checked_add(line.line_total()?))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|line| &line.product_id == product_id)
    }
}

/// The persisted cart.
pub type CartStore = Persisted<CartState>;

impl Persisted<CartState> {
    /// See [`CartState::add_item`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), StorageError> {
        self.update(|cart| cart.add_item(item))
    }

    /// See [`CartState::remove_item`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<(), StorageError> {
        self.update(|cart| cart.remove_item(product_id))
    }

    /// See [`CartState::update_quantity`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), StorageError> {
        self.update(|cart| cart.update_quantity(product_id, quantity))
    }

    /// See [`CartState::clear_cart`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn clear_cart(&mut self) -> Result<(), StorageError> {
        self.update(CartState::clear_cart)
    }

    /// See [`CartState::set_guest_info`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn set_guest_info(&mut self, info: GuestInfo) -> Result<(), StorageError> {
        self.update(|cart| cart.set_guest_info(info))
    }

    /// See [`CartState::clear_guest_info`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn clear_guest_info(&mut self) -> Result<(), StorageError> {
        self.update(CartState::clear_guest_info)
    }
}
