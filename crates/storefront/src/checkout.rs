//! Checkout orchestration.
//!
//! The cart, address book and payment flow know nothing about each other.
//! Checkout reads each one separately, decides whether an order can be
//! placed, and then walks the payment flow to completion.

use core::fmt;

use furnish_core::{
    Address, CardDetails, CartItem, GuestInfo, MobileWalletDetails, PaymentMethod, PaymentStep,
    Price, TransactionId,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::stores::{AddressBook, CartState, PaymentState};
use crate::validation::{FieldError, validate_card_details, validate_wallet_details};

/// Something that stops an order from being placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CheckoutProblem {
    EmptyCart,
    /// Neither a default address nor guest details are available.
    NoShippingDetails,
    NoPaymentMethod,
    MissingCardDetails,
    MissingWalletDetails,
    /// The order total does not fit in a decimal amount.
    TotalTooLarge,
    InvalidField(FieldError),
}

impl fmt::Display for CheckoutProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCart => f.write_str("Your cart is empty"),
            Self::NoShippingDetails => f.write_str("Add a delivery address or guest details"),
            Self::NoPaymentMethod => f.write_str("Choose a payment method"),
            Self::MissingCardDetails => f.write_str("Enter your card details"),
            Self::MissingWalletDetails => f.write_str("Enter your wallet number"),
            Self::TotalTooLarge => f.write_str("Your order total is too large"),
            Self::InvalidField(e) => f.write_str(&e.message),
        }
    }
}

/// Errors from placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("checkout is not ready: {}", join_problems(.0))]
    NotReady(Vec<CheckoutProblem>),

    #[error("payment already completed ({0})")]
    AlreadyComplete(TransactionId),
}

fn join_problems(problems: &[CheckoutProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Where the order ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShipTo {
    Address(Address),
    Guest(GuestInfo),
}

/// A snapshot of everything needed to place an order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub lines: Vec<CartItem>,
    pub item_count: u64,
    /// `None` when the total overflows.
    pub subtotal: Option<Price>,
    pub ship_to: Option<ShipTo>,
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip)]
    card_details: Option<CardDetails>,
    #[serde(skip)]
    wallet_details: Option<MobileWalletDetails>,
}

impl CheckoutSummary {
    /// Gather the order from the three stores.
    ///
    /// The default saved address wins over guest details.
    #[must_use]
    pub fn build(cart: &CartState, addresses: &AddressBook, payment: &PaymentState) -> Self {
        let ship_to = addresses
            .get_default_address()
            .cloned()
            .map(ShipTo::Address)
            .or_else(|| cart.guest_info().cloned().map(ShipTo::Guest));

        Self {
            lines: cart.items().to_vec(),
            item_count: cart.total_items(),
            subtotal: cart.total_price(),
            ship_to,
            payment_method: payment.selected_method,
            card_details: payment.card_details.clone(),
            wallet_details: payment.mobile_wallet_details.clone(),
        }
    }

    /// Everything blocking the order. Empty means ready.
    #[must_use]
    pub fn problems(&self) -> Vec<CheckoutProblem> {
        let mut problems = Vec::new();

        if self.lines.is_empty() {
            problems.push(CheckoutProblem::EmptyCart);
        }
        if self.subtotal.is_none() {
            problems.push(CheckoutProblem::TotalTooLarge);
        }
        if self.ship_to.is_none() {
            problems.push(CheckoutProblem::NoShippingDetails);
        }

        match self.payment_method {
            None => problems.push(CheckoutProblem::NoPaymentMethod),
            Some(PaymentMethod::Card) => match &self.card_details {
                None => problems.push(CheckoutProblem::MissingCardDetails),
                Some(card) => problems.extend(
                    validate_card_details(card)
                        .into_iter()
                        .map(CheckoutProblem::InvalidField),
                ),
            },
            Some(m) if m.is_mobile_wallet() => match &self.wallet_details {
                None => problems.push(CheckoutProblem::MissingWalletDetails),
                Some(wallet) => problems.extend(
                    validate_wallet_details(wallet)
                        .into_iter()
                        .map(CheckoutProblem::InvalidField),
                ),
            },
            // Cash on delivery needs nothing further.
            Some(_) => {}
        }

        problems
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.problems().is_empty()
    }
}

/// Walk the payment flow for `summary` and issue a transaction id.
///
/// On a blocking problem the flow is left at `Details` with `payment_error`
/// set so the form can be corrected and resubmitted.
///
/// # Errors
///
/// Returns `CheckoutError::NotReady` if the summary has problems, or
/// `CheckoutError::AlreadyComplete` if this payment already went through.
#[instrument(skip_all, fields(method = ?summary.payment_method, items = summary.item_count))]
pub fn process_payment(
    payment: &mut PaymentState,
    summary: &CheckoutSummary,
) -> Result<TransactionId, CheckoutError> {
    if payment.is_complete()
        && let Some(id) = payment.transaction_id.clone()
    {
        return Err(CheckoutError::AlreadyComplete(id));
    }

    payment.set_processing(true);
    payment.set_payment_error(None);
    payment.set_payment_step(PaymentStep::Details);

    let problems = summary.problems();
    if !problems.is_empty() {
        warn!(problems = %join_problems(&problems), "Checkout blocked");
        payment.set_payment_error(Some(join_problems(&problems)));
        payment.set_processing(false);
        return Err(CheckoutError::NotReady(problems));
    }

    payment.advance_step();
    let transaction_id = TransactionId::generate();
    payment.set_transaction_id(transaction_id.clone());
    payment.advance_step();
    payment.set_processing(false);

    info!(
        transaction_id = %transaction_id,
        total = %summary.subtotal.map(|p| p.display()).unwrap_or_default(),
        "Payment completed"
    );

    Ok(transaction_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use furnish_core::{AddressId, Email, NewAddress, PhoneNumber};
    use rust_decimal::Decimal;

    use super::*;

    fn cart_with_sofa() -> CartState {
        let mut cart = CartState::default();
        cart.add_item(CartItem::new(
            "sofa",
            "Teak Sofa",
            Decimal::new(45_000, 0),
            "/sofa.jpg",
        ));
        cart
    }

    fn book_with_home() -> AddressBook {
        let mut book = AddressBook::default();
        book.add_address(
            NewAddress {
                label: "Home".into(),
                name: "Ayesha Rahman".into(),
                phone: "01712345678".into(),
                address: "House 12, Road 5, Dhanmondi".into(),
                city: "Dhaka".into(),
                postal_code: "1205".into(),
                is_default: false,
            }
            .into_address(AddressId::new("a1"), Utc::now()),
        );
        book
    }

    fn valid_card() -> CardDetails {
        CardDetails {
            card_number: "4242 4242 4242 4242".into(),
            card_holder: "Ayesha Rahman".into(),
            expiry_date: "12/99".into(),
            cvv: "123".into(),
        }
    }

    #[test]
    fn test_empty_checkout_lists_every_problem() {
        let summary = CheckoutSummary::build(
            &CartState::default(),
            &AddressBook::default(),
            &PaymentState::default(),
        );
        assert_eq!(
            summary.problems(),
            [
                CheckoutProblem::EmptyCart,
                CheckoutProblem::NoShippingDetails,
                CheckoutProblem::NoPaymentMethod,
            ]
        );
    }

    #[test]
    fn test_default_address_wins_over_guest() {
        let mut cart = cart_with_sofa();
        cart.set_guest_info(GuestInfo {
            name: "Guest".into(),
            email: Email::parse("guest@example.com").unwrap(),
            phone: PhoneNumber::parse("01812345678").unwrap(),
            address: "Somewhere".into(),
            city: "Chattogram".into(),
        });
        let summary =
            CheckoutSummary::build(&cart, &book_with_home(), &PaymentState::default());
        assert!(matches!(summary.ship_to, Some(ShipTo::Address(ref a)) if a.id.as_str() == "a1"));

        let summary =
            CheckoutSummary::build(&cart, &AddressBook::default(), &PaymentState::default());
        assert!(matches!(summary.ship_to, Some(ShipTo::Guest(_))));
    }

    #[test]
    fn test_card_payment_completes() {
        let mut payment = PaymentState::default();
        payment.set_payment_method(PaymentMethod::Card);
        payment.set_card_details(valid_card());
        let summary = CheckoutSummary::build(&cart_with_sofa(), &book_with_home(), &payment);

        let id = process_payment(&mut payment, &summary).unwrap();
        assert!(id.as_str().starts_with("TXN-"));
        assert_eq!(payment.payment_step, PaymentStep::Complete);
        assert_eq!(payment.transaction_id, Some(id));
        assert!(!payment.is_processing);
        assert!(payment.is_complete());
    }

    #[test]
    fn test_invalid_card_returns_to_details() {
        let mut payment = PaymentState::default();
        payment.set_payment_method(PaymentMethod::Card);
        payment.set_card_details(CardDetails {
            cvv: "1".into(),
            ..valid_card()
        });
        payment.set_payment_step(PaymentStep::Verify);
        let summary = CheckoutSummary::build(&cart_with_sofa(), &book_with_home(), &payment);

        let err = process_payment(&mut payment, &summary).unwrap_err();
        assert!(matches!(err, CheckoutError::NotReady(ref p) if p.len() == 1));
        assert_eq!(payment.payment_step, PaymentStep::Details);
        assert_eq!(payment.payment_error.as_deref(), Some("CVV must be 3 digits"));
        assert!(payment.transaction_id.is_none());
        assert!(!payment.is_processing);
    }

    #[test]
    fn test_cash_on_delivery_needs_no_details() {
        let mut payment = PaymentState::default();
        payment.set_payment_method(PaymentMethod::CashOnDelivery);
        let summary = CheckoutSummary::build(&cart_with_sofa(), &book_with_home(), &payment);
        assert!(summary.is_ready());
        assert!(process_payment(&mut payment, &summary).is_ok());
    }

    #[test]
    fn test_wallet_requires_details() {
        let mut payment = PaymentState::default();
        payment.set_payment_method(PaymentMethod::Nagad);
        let summary = CheckoutSummary::build(&cart_with_sofa(), &book_with_home(), &payment);
        assert_eq!(summary.problems(), [CheckoutProblem::MissingWalletDetails]);

        payment.set_mobile_wallet_details(MobileWalletDetails {
            phone_number: "01612345678".into(),
            wallet_reference: None,
        });
        let summary = CheckoutSummary::build(&cart_with_sofa(), &book_with_home(), &payment);
        assert!(summary.is_ready());
    }

    #[test]
    fn test_completed_payment_is_not_repeated() {
        let mut payment = PaymentState::default();
        payment.set_payment_method(PaymentMethod::CashOnDelivery);
        let summary = CheckoutSummary::build(&cart_with_sofa(), &book_with_home(), &payment);
        let first = process_payment(&mut payment, &summary).unwrap();

        let err = process_payment(&mut payment, &summary).unwrap_err();
        assert!(matches!(err, CheckoutError::AlreadyComplete(id) if id == first));
    }

    #[test]
    fn test_summary_totals() {
        let mut cart = cart_with_sofa();
        cart.update_quantity(&"sofa".into(), 2);
        let summary = CheckoutSummary::build(&cart, &book_with_home(), &PaymentState::default());
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal, Some(Price::bdt(Decimal::new(90_000, 0))));
    }

    #[test]
    fn test_oversized_total_blocks_payment() {
        let mut cart = CartState::default();
        let vault = CartItem::new("vault", "Gold Vault", Decimal::MAX, "/vault.jpg");
        cart.add_item(vault.clone());
        cart.add_item(vault);

        let mut payment = PaymentState::default();
        payment.set_payment_method(PaymentMethod::CashOnDelivery);
        let summary = CheckoutSummary::build(&cart, &book_with_home(), &payment);
        assert_eq!(summary.subtotal, None);
        assert_eq!(summary.problems(), [CheckoutProblem::TotalTooLarge]);

        let err = process_payment(&mut payment, &summary).unwrap_err();
        assert!(matches!(err, CheckoutError::NotReady(_)));
        assert_eq!(
            payment.payment_error.as_deref(),
            Some("Your order total is too large")
        );
    }
}
