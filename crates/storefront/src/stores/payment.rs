//! Payment flow state for a single checkout attempt.
//!
//! Not persisted: a fresh checkout starts from [`PaymentState::default`] and
//! `reset_payment` returns to it.

use furnish_core::{CardDetails, MobileWalletDetails, PaymentMethod, PaymentStep, TransactionId};

/// Where the customer is in the payment flow and what they entered.
///
/// `payment_step` nominally advances `Select -> Details -> Verify -> Complete`
/// but the setters accept any step. The card and wallet records are kept
/// independently of `selected_method`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentState {
    pub selected_method: Option<PaymentMethod>,
    pub card_details: Option<CardDetails>,
    pub mobile_wallet_details: Option<MobileWalletDetails>,
    pub is_processing: bool,
    pub payment_step: PaymentStep,
    pub transaction_id: Option<TransactionId>,
    pub payment_error: Option<String>,
}

impl PaymentState {
    /// Create the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a payment method. Clears any error from a previous attempt.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.selected_method = Some(method);
        self.payment_error = None;
    }

    pub fn set_card_details(&mut self, details: CardDetails) {
        self.card_details = Some(details);
    }

    pub fn set_mobile_wallet_details(&mut self, details: MobileWalletDetails) {
        self.mobile_wallet_details = Some(details);
    }

    pub const fn set_processing(&mut self, processing: bool) {
        self.is_processing = processing;
    }

    /// Jump to any step. No ordering is enforced here.
    pub const fn set_payment_step(&mut self, step: PaymentStep) {
        self.payment_step = step;
    }

    /// Move one step forward in the nominal order, stopping at `Complete`.
    pub const fn advance_step(&mut self) -> PaymentStep {
        self.payment_step = self.payment_step.next();
        self.payment_step
    }

    pub fn set_transaction_id(&mut self, id: TransactionId) {
        self.transaction_id = Some(id);
    }

    pub fn set_payment_error(&mut self, error: Option<String>) {
        self.payment_error = error;
    }

    /// Discard everything and return to the initial state.
    pub fn reset_payment(&mut self) {
        *self = Self::default();
    }

    /// Whether the flow has finished successfully.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.payment_step == PaymentStep::Complete && self.transaction_id.is_some()
    }
}
