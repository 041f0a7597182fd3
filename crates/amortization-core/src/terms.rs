use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::types::{Money, Percent, Rate};
use crate::AmortizationResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Principal, nominal annual rate and term of a fully amortizing loan.
///
/// Only constructible through [`LoanTerms::new`] (deserialization included),
/// so every computation downstream can rely on a term of at least one month
/// and a non-negative rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLoanTerms", rename_all = "camelCase")]
pub struct LoanTerms {
    principal: Money,
    annual_interest_rate: Percent,
    loan_term_months: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLoanTerms {
    principal: Money,
    annual_interest_rate: Percent,
    loan_term_months: u32,
}

impl TryFrom<RawLoanTerms> for LoanTerms {
    type Error = AmortizationError;

    fn try_from(raw: RawLoanTerms) -> Result<Self, Self::Error> {
        LoanTerms::new(raw.principal, raw.annual_interest_rate, raw.loan_term_months)
    }
}

impl LoanTerms {
    /// Validate and build loan terms.
    ///
    /// `annual_interest_rate` is a percentage (5 = 5% p.a.). Rates above 100%
    /// are accepted.
    pub fn new(
        principal: Money,
        annual_interest_rate: Percent,
        loan_term_months: u32,
    ) -> AmortizationResult<Self> {
        if principal < Decimal::ZERO {
            return Err(AmortizationError::InvalidLoanTerms {
                field: "principal".into(),
                reason: "Principal cannot be negative".into(),
            });
        }
        if annual_interest_rate < Decimal::ZERO {
            return Err(AmortizationError::InvalidLoanTerms {
                field: "annual_interest_rate".into(),
                reason: "Annual interest rate cannot be negative".into(),
            });
        }
        if loan_term_months == 0 {
            return Err(AmortizationError::InvalidLoanTerms {
                field: "loan_term_months".into(),
                reason: "Loan term must be at least 1 month".into(),
            });
        }

        Ok(LoanTerms {
            principal,
            annual_interest_rate,
            loan_term_months,
        })
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_interest_rate(&self) -> Percent {
        self.annual_interest_rate
    }

    pub fn loan_term_months(&self) -> u32 {
        self.loan_term_months
    }

    /// Periodic rate: annual percentage / 100 / 12.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_interest_rate / dec!(100) / MONTHS_PER_YEAR
    }

    pub fn is_interest_free(&self) -> bool {
        self.annual_interest_rate.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_terms() {
        let terms = LoanTerms::new(dec!(50000), dec!(5), 60).unwrap();
        assert_eq!(terms.principal(), dec!(50000));
        assert_eq!(terms.annual_interest_rate(), dec!(5));
        assert_eq!(terms.loan_term_months(), 60);
        assert!(!terms.is_interest_free());
    }

    #[test]
    fn test_monthly_rate() {
        let terms = LoanTerms::new(dec!(1000), dec!(12), 12).unwrap();
        assert_eq!(terms.monthly_rate(), dec!(0.01));
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = LoanTerms::new(dec!(1000), dec!(5), 0).unwrap_err();
        assert!(matches!(
            err,
            AmortizationError::InvalidLoanTerms { ref field, .. } if field == "loan_term_months"
        ));
    }

    #[test]
    fn test_negative_rate_rejected() {
        assert!(LoanTerms::new(dec!(1000), dec!(-0.5), 12).is_err());
    }

    #[test]
    fn test_negative_principal_rejected() {
        assert!(LoanTerms::new(dec!(-1), dec!(5), 12).is_err());
    }

    #[test]
    fn test_rate_above_100_accepted() {
        assert!(LoanTerms::new(dec!(1000), dec!(250), 12).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: LoanTerms = serde_json::from_str(
            r#"{"principal":"12000","annualInterestRate":"0","loanTermMonths":12}"#,
        )
        .unwrap();
        assert!(ok.is_interest_free());

        let bad = serde_json::from_str::<LoanTerms>(
            r#"{"principal":"12000","annualInterestRate":"5","loanTermMonths":0}"#,
        );
        assert!(bad.is_err());
    }
}
