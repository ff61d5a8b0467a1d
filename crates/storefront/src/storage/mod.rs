//! Durable key-value storage for store snapshots.
//!
//! # Architecture
//!
//! Stores never touch the filesystem directly. They receive an
//! `Arc<dyn Storage>` and write JSON snapshots through it, mirroring the
//! browser local-storage contract (`getItem`/`setItem`/`removeItem`):
//!
//! - [`MemoryStorage`] - in-process map, for tests and throwaway sessions
//! - [`FileStorage`] - one JSON file per key under a data directory
//!
//! # Snapshot format
//!
//! Every persisted store writes `{"state": <state>, "version": <n>}` under its
//! key. See [`Snapshot`].

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when reading or writing snapshots.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot could not be encoded.
    #[error("failed to serialize snapshot for key {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The key cannot be mapped onto the backing medium.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Local-storage style key-value port.
///
/// Values are opaque strings (JSON snapshots in practice). Implementations
/// must be safe to share between threads, although stores only ever call them
/// from one task at a time.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Versioned envelope written for every persisted store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<S> {
    pub state: S,
    pub version: u32,
}

/// Keys must be usable as file names on every platform.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("furniture-cart").is_ok());
        assert!(validate_key("founder_member_popup_dismissed").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a b").is_err());
    }

    #[test]
    fn test_snapshot_shape() {
        let snapshot = Snapshot {
            state: vec![1, 2],
            version: 0,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"state":[1,2],"version":0}"#);
    }
}
