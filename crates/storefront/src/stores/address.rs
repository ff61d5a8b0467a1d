//! Saved delivery addresses, persisted under `address-storage`.
//!
//! Whenever the book is non-empty exactly one address is the default. Every
//! transition below restores that rule before returning.

use chrono::{DateTime, Utc};
use furnish_core::{Address, AddressId, AddressUpdate, NewAddress};
use serde::{Deserialize, Serialize};

use super::{Persisted, PersistedState};
use crate::storage::StorageError;

/// The customer's saved addresses, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    addresses: Vec<Address>,
}

impl PersistedState for AddressBook {
    const KEY: &'static str = "address-storage";

    /// Keep the first flagged default, or promote the first address when
    /// none is flagged.
    fn normalize(&mut self) {
        let keep = self
            .addresses
            .iter()
            .position(|a| a.is_default)
            .unwrap_or(0);
        for (index, address) in self.addresses.iter_mut().enumerate() {
            address.is_default = index == keep;
        }
    }
}

impl AddressBook {
    /// Append an address that already carries its identity.
    ///
    /// The first address always becomes the default, whatever its flag says.
    /// A later address flagged default takes the flag from all others.
    ///
    /// Returns the address as stored.
    pub fn add_address(&mut self, mut address: Address) -> Address {
        if self.addresses.is_empty() {
            address.is_default = true;
        }
        if address.is_default {
            self.clear_defaults();
        }
        self.addresses.push(address.clone());
        address
    }

    /// Patch an address. Unknown IDs are ignored.
    ///
    /// Setting `is_default` to `true` makes this the only default. Setting it
    /// to `false` on the current default is ignored, since some address must
    /// stay default.
    pub fn update_address(&mut self, id: &AddressId, update: &AddressUpdate) {
        let Some(address) = self.addresses.iter_mut().find(|a| &a.id == id) else {
            return;
        };
        update.apply_fields(address);

        if update.is_default == Some(true) {
            self.set_default_address(id);
        }
    }

    /// Delete an address. If it was the default, the first remaining address
    /// becomes the default.
    pub fn remove_address(&mut self, id: &AddressId) {
        let Some(index) = self.addresses.iter().position(|a| &a.id == id) else {
            return;
        };
        let removed = self.addresses.remove(index);
        if removed.is_default
            && let Some(first) = self.addresses.first_mut()
        {
            first.is_default = true;
        }
    }

    /// Make `id` the only default. Unknown IDs are ignored.
    pub fn set_default_address(&mut self, id: &AddressId) {
        if !self.addresses.iter().any(|a| &a.id == id) {
            return;
        }
        for address in &mut self.addresses {
            address.is_default = &address.id == id;
        }
    }

    /// The current default address, if any address is saved.
    #[must_use]
    pub fn get_default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }

    /// Look up an address by ID.
    #[must_use]
    pub fn get(&self, id: &AddressId) -> Option<&Address> {
        self.addresses.iter().find(|a| &a.id == id)
    }

    /// Saved addresses in insertion order.
    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Whether no addresses are saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    fn clear_defaults(&mut self) {
        for address in &mut self.addresses {
            address.is_default = false;
        }
    }
}

/// The persisted address book.
pub type AddressStore = Persisted<AddressBook>;

impl Persisted<AddressBook> {
    /// Add an address, assigning a fresh ID and the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn add_address(&mut self, input: NewAddress) -> Result<Address, StorageError> {
        self.add_address_at(input, Utc::now())
    }

    /// Add an address created at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn add_address_at(
        &mut self,
        input: NewAddress,
        now: DateTime<Utc>,
    ) -> Result<Address, StorageError> {
        let address = input.into_address(AddressId::generate(), now);
        self.update(|book| book.add_address(address))
    }

    /// See [`AddressBook::update_address`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn update_address(
        &mut self,
        id: &AddressId,
        update: &AddressUpdate,
    ) -> Result<(), StorageError> {
        self.update(|book| book.update_address(id, update))
    }

    /// See [`AddressBook::remove_address`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn remove_address(&mut self, id: &AddressId) -> Result<(), StorageError> {
        self.update(|book| book.remove_address(id))
    }

    /// See [`AddressBook::set_default_address`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn set_default_address(&mut self, id: &AddressId) -> Result<(), StorageError> {
        self.update(|book| book.set_default_address(id))
    }
}
