//! Contact details: email addresses and Bangladeshi mobile numbers.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input is not `local@domain` with a dotted domain.
    #[error("email must look like name@domain.tld")]
    Malformed,
}

/// An email address, as captured by guest checkout.
///
/// Only structural checks are applied: one `@`, a non-empty local part and a
/// domain containing a dot. Surrounding whitespace is trimmed.
///
/// ```
/// use furnish_core::Email;
///
/// assert!(Email::parse("guest@example.com").is_ok());
/// assert!(Email::parse("guest@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than 254
    /// characters, or not of the form `local@domain.tld`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::Malformed)?;
        let domain_ok = !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.');
        if local.is_empty() || !domain_ok {
            return Err(EmailError::Malformed);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input is not a Bangladeshi mobile number.
    #[error("enter a valid Bangladeshi mobile number (e.g. 01712345678)")]
    Invalid,
}

/// Bangladeshi mobile numbers: optional `+88`/`88` country prefix, then
/// `01` and an operator digit 3-9, then eight ASCII digits.
static BD_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+?88)?01[3-9][0-9]{8}$").expect("valid BD mobile regex"));

/// A Bangladeshi mobile number, stored in local `01XXXXXXXXX` form.
///
/// Spaces and dashes are ignored when parsing, and a `+88` or `88` country
/// prefix is stripped.
///
/// ```
/// use furnish_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("+880 1712-345678").unwrap();
/// assert_eq!(phone.as_str(), "01712345678");
/// assert!(PhoneNumber::parse("12345").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a `PhoneNumber` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank or does not match a
    /// Bangladeshi operator prefix.
    pub fn parse(s: &str) -> Result<Self, PhoneNumberError> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if compact.is_empty() {
            return Err(PhoneNumberError::Empty);
        }
        if !BD_MOBILE.is_match(&compact) {
            return Err(PhoneNumberError::Invalid);
        }

        let local_start = compact.len() - 11;
        Ok(Self(compact.get(local_start..).unwrap_or(&compact).to_owned()))
    }

    /// Returns the number in local `01XXXXXXXXX` form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number in international `+8801XXXXXXXXX` form.
    #[must_use]
    pub fn international(&self) -> String {
        format!("+88{}", self.0)
    }

    /// Mobile operator inferred from the prefix.
    #[must_use]
    pub fn operator(&self) -> &'static str {
        match self.0.get(..3) {
            Some("017" | "013") => "Grameenphone",
            Some("018") => "Robi",
            Some("016") => "Airtel",
            Some("019" | "014") => "Banglalink",
            Some("015") => "Teletalk",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
