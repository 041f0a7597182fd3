use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::AmortizationError;
use crate::terms::LoanTerms;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Level monthly payment that fully amortizes the loan over its term.
///
/// `M = P · r(1+r)^n / ((1+r)^n − 1)` with `r` the monthly rate. An
/// interest-free loan pays `P / n` (the formula is 0/0 at `r = 0`).
/// The result is not rounded.
pub fn calculate_monthly_payment(terms: &LoanTerms) -> AmortizationResult<Money> {
    let n = terms.loan_term_months();
    let principal = terms.principal();

    if terms.is_interest_free() {
        return Ok(principal / Decimal::from(n));
    }

    annuity_payment(principal, terms.monthly_rate(), n)
}

fn annuity_payment(principal: Money, rate: Rate, nper: u32) -> AmortizationResult<Money> {
    let overflow = || AmortizationError::overflow(format!("annuity factor (1 + {rate})^{nper}"));

    let factor = (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(overflow)?;
    let denominator = factor - Decimal::ONE;

    // (1+r)^n rounded back to exactly 1 at 28 digits: the rate is below
    // Decimal resolution, so the loan behaves as interest-free.
    if denominator.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    principal
        .checked_mul(rate)
        .and_then(|pr| pr.checked_mul(factor))
        .and_then(|numerator| numerator.checked_div(denominator))
        .ok_or_else(overflow)
}
