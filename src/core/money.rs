use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places carried by BRL amounts
pub const BRL_SCALE: u32 = 2;

/// Rounds an amount to BRL precision, half away from zero
pub fn round_brl(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(BRL_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a BRL amount to integer centavos for the gateway wire format.
///
/// Returns `None` when the amount does not fit an `i64` after scaling.
pub fn to_cents(amount: Decimal) -> Option<i64> {
    (amount * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Validates that an amount is a positive, payable value
pub fn validate_amount(amount: Decimal) -> std::result::Result<(), String> {
    if amount <= Decimal::ZERO {
        return Err(format!("Amount must be positive, got {}", amount));
    }

    if amount.scale() > BRL_SCALE {
        return Err(format!(
            "BRL amounts must have at most {} decimal places, got {}",
            BRL_SCALE,
            amount.scale()
        ));
    }

    Ok(())
}
