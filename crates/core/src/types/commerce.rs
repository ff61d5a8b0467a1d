//! Commerce entities held by the client-side stores.
//!
//! Field names serialize in camelCase so persisted snapshots keep the shape
//! the storefront has always written (`productId`, `isDefault`, ...).

use core::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::contact::{Email, PhoneNumber};
use super::id::{AddressId, ProductId};
use super::price::Price;

// =============================================================================
// Cart
// =============================================================================

/// A line in the shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price in BDT.
    pub price: Decimal,
    pub image: String,
    /// Always at least 1 while the line is in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Create a line for a single unit of a product.
    #[must_use]
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            image: image.into(),
            quantity: 1,
        }
    }

    /// Unit price times quantity, or `None` if the amount overflows.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        Price::bdt(self.price).checked_mul(self.quantity)
    }
}

/// Contact and delivery details for checkout without an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestInfo {
    pub name: String,
    pub email: Email,
    pub phone: PhoneNumber,
    pub address: String,
    pub city: String,
}

// =============================================================================
// Wishlist
// =============================================================================

/// A saved product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: ProductId,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    pub image: String,
    pub added_at: DateTime<Utc>,
}

impl WishlistItem {
    /// Create a wishlist entry stamped with the current time.
    #[must_use]
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        slug: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            slug: slug.into(),
            price,
            sale_price: None,
            image: image.into(),
            added_at: Utc::now(),
        }
    }

    /// Set a discounted price.
    #[must_use]
    pub const fn with_sale_price(mut self, sale_price: Decimal) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// The price the customer would pay now.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }
}

// =============================================================================
// Addresses
// =============================================================================

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    /// Short label such as "Home" or "Office".
    pub label: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for adding an address; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub label: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    #[serde(default)]
    pub is_default: bool,
}

impl NewAddress {
    /// Attach the store-assigned identity.
    #[must_use]
    pub fn into_address(self, id: AddressId, created_at: DateTime<Utc>) -> Address {
        Address {
            id,
            label: self.label,
            name: self.name,
            phone: self.phone,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            is_default: self.is_default,
            created_at,
        }
    }
}

/// Partial update for an existing address. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressUpdate {
    pub label: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub is_default: Option<bool>,
}

impl AddressUpdate {
    /// Apply the text fields to `address`. `is_default` is left to the caller,
    /// which owns the one-default rule.
    pub fn apply_fields(&self, address: &mut Address) {
        let fields = [
            (&self.label, &mut address.label),
            (&self.name, &mut address.name),
            (&self.phone, &mut address.phone),
            (&self.address, &mut address.address),
            (&self.city, &mut address.city),
            (&self.postal_code, &mut address.postal_code),
        ];
        for (update, field) in fields {
            if let Some(value) = update {
                field.clone_from(value);
            }
        }
    }
}

// =============================================================================
// Payment details
// =============================================================================

/// Card details captured during checkout. Never persisted.
///
/// Implements `Debug` manually to redact the card number and CVV.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub card_number: String,
    pub card_holder: String,
    /// `MM/YY`
    pub expiry_date: String,
    pub cvv: String,
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: String = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let last4 = digits.get(digits.len().saturating_sub(4)..).unwrap_or("");
        f.debug_struct("CardDetails")
            .field("card_number", &format!("**** {last4}"))
            .field("card_holder", &self.card_holder)
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

/// Mobile wallet (bKash, Nagad, Rocket) details captured during checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileWalletDetails {
    /// Wallet account number (a mobile number).
    pub phone_number: String,
    /// Reference the customer received from the wallet app, if any.
    #[serde(default)]
    pub wallet_reference: Option<String>,
}
