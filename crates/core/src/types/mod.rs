//! Core types for Furnish.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cms;
pub mod commerce;
pub mod contact;
pub mod id;
pub mod price;
pub mod status;

pub use cms::*;
pub use commerce::*;
pub use contact::{Email, EmailError, PhoneNumber, PhoneNumberError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use status::*;
