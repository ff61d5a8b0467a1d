//! `furnish checkout`

use clap::Args;
use furnish_core::{CardDetails, MobileWalletDetails, PaymentMethod};
use furnish_storefront::checkout::{CheckoutSummary, process_payment};
use furnish_storefront::stores::PaymentState;
use furnish_storefront::{AppState, Result};
use serde_json::json;
use tracing::info;

use super::print_json;

#[derive(Args)]
pub struct CheckoutArgs {
    /// card, bkash, nagad, rocket or cod
    #[arg(long)]
    method: PaymentMethod,

    #[arg(long)]
    card_number: Option<String>,
    #[arg(long)]
    card_holder: Option<String>,
    /// MM/YY
    #[arg(long)]
    expiry: Option<String>,
    #[arg(long)]
    cvv: Option<String>,

    /// Wallet account number for bKash, Nagad or Rocket
    #[arg(long)]
    wallet_phone: Option<String>,
    #[arg(long)]
    wallet_reference: Option<String>,

    /// Show the order summary and its problems without paying
    #[arg(long)]
    dry_run: bool,
}

impl CheckoutArgs {
    fn payment_state(self) -> PaymentState {
        let mut payment = PaymentState::new();
        payment.set_payment_method(self.method);

        if self.card_number.is_some() || self.card_holder.is_some() {
            payment.set_card_details(CardDetails {
                card_number: self.card_number.unwrap_or_default(),
                card_holder: self.card_holder.unwrap_or_default(),
                expiry_date: self.expiry.unwrap_or_default(),
                cvv: self.cvv.unwrap_or_default(),
            });
        }
        if let Some(phone_number) = self.wallet_phone {
            payment.set_mobile_wallet_details(MobileWalletDetails {
                phone_number,
                wallet_reference: self.wallet_reference,
            });
        }
        payment
    }
}

/// Place an order. On success the cart is emptied; saved addresses are kept.
pub fn run(state: &AppState, args: CheckoutArgs) -> Result<()> {
    let dry_run = args.dry_run;
    let mut payment = args.payment_state();
    let mut cart = state.cart()?;
    let addresses = state.addresses()?;

    let summary = CheckoutSummary::build(cart.state(), addresses.state(), &payment);

    if dry_run {
        let problems: Vec<String> = summary.problems().iter().map(ToString::to_string).collect();
        print_json(&json!({ "summary": summary, "problems": problems }));
        return Ok(());
    }

    let transaction_id = process_payment(&mut payment, &summary)?;
    cart.clear_cart()?;
    info!(transaction_id = %transaction_id, "Order placed");

    print_json(&json!({
        "transactionId": transaction_id,
        "total": summary.subtotal.map(|p| p.display()),
        "items": summary.item_count,
        "paymentStep": payment.payment_step,
    }));
    Ok(())
}
