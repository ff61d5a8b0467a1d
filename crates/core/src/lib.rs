//! Furnish Core - Shared types library.
//!
//! This crate provides common types used across all Furnish components:
//! - `storefront` - Client-side commerce state (cart, wishlist, addresses,
//!   payment flow) and the CMS API client
//! - `cli` - Command-line driver for the stores and the CMS API
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, contact details, statuses, commerce
//!   entities and CMS record shapes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
