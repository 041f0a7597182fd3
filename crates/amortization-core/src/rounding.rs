use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Decimal places used for every reported money value.
pub const MONEY_DP: u32 = 2;

/// Round a money value to cents, half away from zero.
///
/// Applied only where values leave the engine (summaries, early-payoff
/// results, display). Schedules and simulations stay unrounded.
pub fn round_money(value: Money) -> Money {
    round_to(value, MONEY_DP)
}

/// Round to `dp` decimal places, half away from zero.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
