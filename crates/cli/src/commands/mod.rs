//! Subcommand implementations.

pub mod address;
pub mod cart;
pub mod checkout;
pub mod cms;
pub mod prefs;
pub mod validate;
pub mod wishlist;

use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "Failed to serialize output"),
    }
}
