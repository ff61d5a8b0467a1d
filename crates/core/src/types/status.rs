//! Status enums for the checkout flow and catalog.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Step of the payment flow.
///
/// The nominal order is `Select -> Details -> Verify -> Complete`; the
/// payment store does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStep {
    #[default]
    Select,
    Details,
    Verify,
    Complete,
}

impl PaymentStep {
    /// The following step in the nominal order, saturating at `Complete`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Select => Self::Details,
            Self::Details => Self::Verify,
            Self::Verify | Self::Complete => Self::Complete,
        }
    }

    /// Lowercase name, as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Details => "details",
            Self::Verify => "verify",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for PaymentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Bkash,
    Nagad,
    Rocket,
    CashOnDelivery,
}

impl PaymentMethod {
    /// Whether this method is a mobile wallet needing wallet details.
    #[must_use]
    pub const fn is_mobile_wallet(self) -> bool {
        matches!(self, Self::Bkash | Self::Nagad | Self::Rocket)
    }

    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::Bkash => "bKash",
            Self::Nagad => "Nagad",
            Self::Rocket => "Rocket",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "card" => Ok(Self::Card),
            "bkash" => Ok(Self::Bkash),
            "nagad" => Ok(Self::Nagad),
            "rocket" => Ok(Self::Rocket),
            "cod" | "cash_on_delivery" => Ok(Self::CashOnDelivery),
            other => Err(format!(
                "unknown payment method: {other} (card, bkash, nagad, rocket, cod)"
            )),
        }
    }
}

/// Card network, inferred from the card number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Visa,
    Mastercard,
    Amex,
    #[default]
    Unknown,
}

impl CardType {
    /// Number of CVV digits printed on this card network.
    #[must_use]
    pub const fn cvv_length(self) -> usize {
        match self {
            Self::Amex => 4,
            _ => 3,
        }
    }
}

/// Category grouping used by `/api/categories/:type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Shop-by-room groupings (living room, bedroom, ...).
    Room,
    /// Product-type groupings (sofas, beds, ...).
    Product,
}

impl CategoryKind {
    /// Path segment for the categories endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Product => "product",
        }
    }
}

impl std::str::FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "room" => Ok(Self::Room),
            "product" => Ok(Self::Product),
            other => Err(format!("unknown category type: {other}")),
        }
    }
}
