//! Furnish storefront client layer.
//!
//! Client-side state for the furniture storefront: the cart, wishlist,
//! address book and payment flow stores, the CMS API client with its
//! staleness cache, payment field validation, and checkout orchestration.
//!
//! # Modules
//!
//! - [`stores`] - persisted stores over a [`storage::Storage`] port
//! - [`cms`] - cached homepage and search endpoints
//! - [`validation`] - card, expiry, CVV and phone checks
//! - [`checkout`] - reads the stores and completes the payment flow
//! - [`state`] - wires configuration, storage and the CMS client together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod cms;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod stores;
pub mod telemetry;
pub mod validation;

pub use error::{AppError, Result};
pub use state::AppState;
