//! Simulated card gateway.
//!
//! No real provider sits behind the API: any card number is accepted
//! except those carrying the designated test prefix, which are always
//! declined so clients can exercise the failure path end to end.

use crate::error::CoreError;

/// Card numbers beginning with this prefix are always declined.
pub const DECLINED_CARD_PREFIX: &str = "4111";

/// Run the gateway decision for a card number.
///
/// Returns [`CoreError::PaymentDeclined`] for test-decline cards and
/// [`CoreError::Validation`] for an empty number; every other number is
/// charged successfully.
pub fn charge_card(card_number: &str) -> Result<(), CoreError> {
    let card_number = card_number.trim();
    if card_number.is_empty() {
        return Err(CoreError::Validation("Card number is required".to_string()));
    }
    if card_number.starts_with(DECLINED_CARD_PREFIX) {
        return Err(CoreError::PaymentDeclined(
            "Payment failed: Card declined. Please try another card.".to_string(),
        ));
    }
    Ok(())
}
