//! `furnish validate`

use clap::Subcommand;
use furnish_core::PhoneNumber;
use furnish_storefront::validation::{
    detect_card_type, format_card_number, mask_card_number, validate_card_number, validate_cvv,
    validate_expiry,
};
use serde_json::{Value, json};

use super::print_json;

#[derive(Subcommand)]
pub enum ValidateAction {
    /// Check a card number (Luhn, 13-19 digits) and detect its network
    Card { number: String },
    /// Check an MM/YY expiry date
    Expiry { date: String },
    /// Check a CVV against the card network
    Cvv {
        cvv: String,
        /// Card number used to pick the expected length
        #[arg(long)]
        number: Option<String>,
    },
    /// Check a Bangladeshi mobile number and show its operator
    Phone { number: String },
}

pub fn run(action: &ValidateAction) {
    print_json(&report(action));
}

fn report(action: &ValidateAction) -> Value {
    match action {
        ValidateAction::Card { number } => json!({
            "valid": validate_card_number(number),
            "cardType": detect_card_type(number),
            "formatted": format_card_number(number),
            "masked": mask_card_number(number),
        }),
        ValidateAction::Expiry { date } => json!({ "valid": validate_expiry(date) }),
        ValidateAction::Cvv { cvv, number } => {
            let card_type = number
                .as_deref()
                .map(detect_card_type)
                .unwrap_or_default();
            json!({
                "valid": validate_cvv(cvv, card_type),
                "expectedLength": card_type.cvv_length(),
            })
        }
        ValidateAction::Phone { number } => match PhoneNumber::parse(number) {
            Ok(phone) => json!({
                "valid": true,
                "local": phone.as_str(),
                "international": phone.international(),
                "operator": phone.operator(),
            }),
            Err(e) => json!({ "valid": false, "error": e.to_string() }),
        },
    }
}
