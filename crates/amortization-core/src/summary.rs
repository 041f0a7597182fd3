use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::payment::calculate_monthly_payment;
use crate::rounding::round_money;
use crate::terms::LoanTerms;
use crate::types::{Money, Percent};
use crate::AmortizationResult;

/// Headline figures for a loan, money rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    /// Echo of the nominal annual rate; no compounding is applied.
    pub effective_interest_rate: Percent,
}

pub fn calculate_loan_summary(terms: &LoanTerms) -> AmortizationResult<LoanSummary> {
    let monthly_payment = calculate_monthly_payment(terms)?;
    let total_payment = total_of_payments(terms, monthly_payment)?;
    let total_interest = total_payment - terms.principal();

    Ok(LoanSummary {
        monthly_payment: round_money(monthly_payment),
        total_payment: round_money(total_payment),
        total_interest: round_money(total_interest),
        effective_interest_rate: terms.annual_interest_rate(),
    })
}

/// Unrounded `payment × term − principal` used by comparisons against the
/// standard schedule.
#[cfg(feature = "early_payoff")]
pub(crate) fn standard_total_interest(terms: &LoanTerms) -> AmortizationResult<Money> {
    let monthly_payment = calculate_monthly_payment(terms)?;
    Ok(total_of_payments(terms, monthly_payment)? - terms.principal())
}

fn total_of_payments(terms: &LoanTerms, monthly_payment: Money) -> AmortizationResult<Money> {
    monthly_payment
        .checked_mul(Decimal::from(terms.loan_term_months()))
        .ok_or_else(|| {
            AmortizationError::overflow(format!(
                "total of {} payments of {monthly_payment}",
                terms.loan_term_months()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_car_loan() {
        let terms = LoanTerms::new(dec!(50000), dec!(5), 60).unwrap();
        let s = calculate_loan_summary(&terms).unwrap();
        assert_eq!(s.monthly_payment, dec!(943.56));
        assert_eq!(s.total_payment, dec!(56613.70));
        assert_eq!(s.total_interest, dec!(6613.70));
        assert_eq!(s.effective_interest_rate, dec!(5));
    }

    #[test]
    fn test_total_interest_is_total_minus_principal() {
        let terms = LoanTerms::new(dec!(18750), dec!(9.9), 36).unwrap();
        let s = calculate_loan_summary(&terms).unwrap();
        assert!((s.total_payment - terms.principal() - s.total_interest).abs() <= dec!(0.01));
    }

    #[test]
    fn test_interest_free_summary() {
        let terms = LoanTerms::new(dec!(12000), dec!(0), 12).unwrap();
        let s = calculate_loan_summary(&terms).unwrap();
        assert_eq!(s.monthly_payment, dec!(1000));
        assert_eq!(s.total_payment, dec!(12000));
        assert_eq!(s.total_interest, Decimal::ZERO);
        assert_eq!(s.effective_interest_rate, Decimal::ZERO);
    }

    #[test]
    fn test_total_payment_overflow_is_an_error() {
        // The payment itself fits; 60 of them exceed Decimal::MAX
        let terms =
            LoanTerms::new(dec!(75_000_000_000_000_000_000_000_000_000), dec!(5), 60).unwrap();
        assert!(calculate_monthly_payment(&terms).is_ok());
        let err = calculate_loan_summary(&terms).unwrap_err();
        assert!(matches!(err, AmortizationError::ArithmeticOverflow { .. }));
    }
}
