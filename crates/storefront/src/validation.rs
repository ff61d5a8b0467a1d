//! Payment field validation.
//!
//! Pure functions over user input. The checkout form shows a
//! [`FieldError`] next to each offending field.

use chrono::{Datelike, NaiveDate, Utc};
use furnish_core::{CardDetails, CardType, MobileWalletDetails, PhoneNumber};
use serde::Serialize;

/// A validation failure attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Digits of a card number with spaces and dashes removed, or `None` if any
/// other character is present.
fn card_digits(input: &str) -> Option<String> {
    let mut digits = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            ' ' | '-' => {}
            _ => return None,
        }
    }
    Some(digits)
}

/// Luhn checksum over an all-digit string.
fn luhn_valid(digits: &str) -> bool {
    let mut sum = 0;
    for (i, d) in digits.bytes().rev().map(|b| u32::from(b - b'0')).enumerate() {
        sum += if i % 2 == 1 {
            let doubled = d * 2;
            if doubled > 9 { doubled - 9 } else { doubled }
        } else {
            d
        };
    }
    sum % 10 == 0
}

/// Whether `input` is a plausible card number: 13-19 digits (spaces and
/// dashes allowed) passing the Luhn check.
///
/// ```
/// use furnish_storefront::validation::validate_card_number;
///
/// assert!(validate_card_number("4242 4242 4242 4242"));
/// assert!(!validate_card_number("1234567890123"));
/// ```
#[must_use]
pub fn validate_card_number(input: &str) -> bool {
    card_digits(input)
        .is_some_and(|digits| (13..=19).contains(&digits.len()) && luhn_valid(&digits))
}

/// Card network from the number prefix.
#[must_use]
pub fn detect_card_type(input: &str) -> CardType {
    let Some(digits) = card_digits(input) else {
        return CardType::Unknown;
    };
    let prefix = |n: usize| digits.get(..n).and_then(|p| p.parse::<u32>().ok());

    if digits.starts_with('4') {
        CardType::Visa
    } else if matches!(prefix(2), Some(34 | 37)) {
        CardType::Amex
    } else if matches!(prefix(2), Some(51..=55)) || matches!(prefix(4), Some(2221..=2720)) {
        CardType::Mastercard
    } else {
        CardType::Unknown
    }
}

/// Whether `input` is an `MM/YY` expiry that has not yet passed.
#[must_use]
pub fn validate_expiry(input: &str) -> bool {
    validate_expiry_at(input, Utc::now().date_naive())
}

/// [`validate_expiry`] against an explicit `today`.
///
/// A card is valid through the last day of its expiry month.
#[must_use]
pub fn validate_expiry_at(input: &str, today: NaiveDate) -> bool {
    let Some((month, year)) = input.trim().split_once('/') else {
        return false;
    };
    let (month, year) = (month.trim(), year.trim());
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    let (Ok(month), Ok(year)) = (month.parse::<u32>(), year.parse::<i32>()) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }

    let year = 2000 + year;
    (year, month) >= (today.year(), today.month())
}

/// Whether `cvv` has the right number of digits for `card_type`.
#[must_use]
pub fn validate_cvv(cvv: &str, card_type: CardType) -> bool {
    cvv.len() == card_type.cvv_length() && cvv.bytes().all(|b| b.is_ascii_digit())
}

/// Whether `input` is a Bangladeshi mobile number.
///
/// ```
/// use furnish_storefront::validation::validate_bd_phone_number;
///
/// assert!(validate_bd_phone_number("01712345678"));
/// assert!(!validate_bd_phone_number("12345"));
/// ```
#[must_use]
pub fn validate_bd_phone_number(input: &str) -> bool {
    PhoneNumber::parse(input).is_ok()
}

/// Group card digits for display: 4-6-5 for Amex, blocks of four otherwise.
///
/// Non-digit characters are dropped.
#[must_use]
pub fn format_card_number(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    let groups: &[usize] = if detect_card_type(&digits) == CardType::Amex {
        &[4, 6, 5]
    } else {
        &[4, 4, 4, 4, 3]
    };

    let mut out = String::with_capacity(digits.len() + groups.len());
    let mut rest = digits.as_str();
    for &size in groups {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(size.min(rest.len()));
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(head);
        rest = tail;
    }
    out
}

/// Hide all but the last four digits.
#[must_use]
pub fn mask_card_number(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    let last4 = digits.get(digits.len().saturating_sub(4)..).unwrap_or("");
    format!("**** **** **** {last4}")
}

/// Check every card field. An empty result means the details are usable.
#[must_use]
pub fn validate_card_details(details: &CardDetails) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !validate_card_number(&details.card_number) {
        errors.push(FieldError::new("cardNumber", "Invalid card number"));
    }
    if details.card_holder.trim().is_empty() {
        errors.push(FieldError::new("cardHolder", "Cardholder name is required"));
    }
    if !validate_expiry(&details.expiry_date) {
        errors.push(FieldError::new("expiryDate", "Invalid or expired date (MM/YY)"));
    }
    let card_type = detect_card_type(&details.card_number);
    if !validate_cvv(&details.cvv, card_type) {
        errors.push(FieldError::new(
            "cvv",
            format!("CVV must be {} digits", card_type.cvv_length()),
        ));
    }

    errors
}

/// Check mobile wallet fields.
#[must_use]
pub fn validate_wallet_details(details: &MobileWalletDetails) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Err(e) = PhoneNumber::parse(&details.phone_number) {
        errors.push(FieldError::new("phoneNumber", e.to_string()));
    }
    errors
}
