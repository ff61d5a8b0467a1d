//! Unified error handling.
//!
//! Each concern has its own error enum; `AppError` wraps them so callers such
//! as the CLI can use `?` across stores, the CMS client and checkout.

use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::cms::CmsError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A store snapshot could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// CMS API request failed.
    #[error("CMS error: {0}")]
    Cms(#[from] CmsError),

    /// The order could not be placed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Referenced item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before reaching a store.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for storefront operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error() {
        let err: AppError = StorageError::InvalidKey("../etc".into()).into();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(err.to_string().starts_with("Storage error:"));
    }

    #[test]
    fn test_from_config_error() {
        let err: AppError =
            ConfigError::InvalidEnvVar("FURNISH_LOG_FORMAT".into(), "xml".into()).into();
        assert_eq!(
            err.to_string(),
            "Config error: Invalid environment variable FURNISH_LOG_FORMAT: xml"
        );
    }
}
