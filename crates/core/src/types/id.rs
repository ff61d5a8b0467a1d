//! Newtype IDs for type-safe entity references.
//!
//! Server records are keyed by opaque strings (CMS record IDs, product IDs),
//! so every ID wraps a `String`. Use the `define_id!` macro to create wrappers
//! that prevent accidentally mixing IDs from different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use furnish_core::define_id;
/// define_id!(OrderId);
/// define_id!(CouponId);
///
/// let order_id = OrderId::new("ord_1");
/// let coupon_id = CouponId::new("ord_1");
///
/// // These are different types, so this won't compile:
/// // let _: OrderId = coupon_id;
/// assert_eq!(order_id.as_str(), coupon_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(AddressId);
define_id!(CategoryId);
define_id!(HeroSlideId);
define_id!(FeatureCardId);
define_id!(CompanyId);
define_id!(ReviewId);
define_id!(TransactionId);

impl AddressId {
    /// Generate a fresh random address ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl TransactionId {
    /// Generate a fresh transaction reference (`TXN-` followed by 12 hex digits).
    #[must_use]
    pub fn generate() -> Self {
        let simple = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
        Self(format!("TXN-{}", simple.get(..12).unwrap_or(&simple)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_is_transparent() {
        let id = ProductId::new("prod_42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"prod_42\"");
        let parsed: ProductId = serde_json::from_str("\"prod_42\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_generated_address_ids_are_unique() {
        assert_ne!(AddressId::generate(), AddressId::generate());
    }

    #[test]
    fn test_transaction_id_shape() {
        let id = TransactionId::generate();
        assert!(id.as_str().starts_with("TXN-"));
        assert_eq!(id.as_str().len(), 16);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CategoryId::from("living-room")), "living-room");
    }
}
