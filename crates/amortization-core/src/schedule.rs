//! Period-by-period amortization ledger and the dated payment schedule built
//! on top of it.
//!
//! Values are carried unrounded from period to period; the final period's
//! principal absorbs whatever balance is left so the loan closes at exactly
//! zero.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::add_months;
use crate::error::AmortizationError;
use crate::payment::calculate_monthly_payment;
use crate::terms::LoanTerms;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One row of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPayment {
    /// 1-based period number.
    pub month: u32,
    pub due_date: NaiveDate,
    pub principal_payment: Money,
    pub interest_payment: Money,
    /// `principal_payment + interest_payment`.
    pub total_payment: Money,
    pub remaining_balance: Money,
}

/// A ledger period before it is attached to the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub month: u32,
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub total_payment: Money,
    pub remaining_balance: Money,
}

/// Principal / interest split of a single payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal: Money,
    pub interest: Money,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Lazy iterator over the periods of a standard amortization.
///
/// Yields exactly `loan_term_months` entries, or stops after the first
/// overflowing period.
#[derive(Debug, Clone)]
pub struct AmortizationLedger {
    monthly_payment: Money,
    monthly_rate: Rate,
    term: u32,
    month: u32,
    balance: Money,
}

impl AmortizationLedger {
    pub fn new(terms: &LoanTerms) -> AmortizationResult<Self> {
        Ok(AmortizationLedger {
            monthly_payment: calculate_monthly_payment(terms)?,
            monthly_rate: terms.monthly_rate(),
            term: terms.loan_term_months(),
            month: 0,
            balance: terms.principal(),
        })
    }

    pub fn monthly_payment(&self) -> Money {
        self.monthly_payment
    }

    fn step(&mut self) -> AmortizationResult<LedgerEntry> {
        self.month += 1;
        let month = self.month;
        let overflow = move || AmortizationError::overflow(format!("amortization period {month}"));

        let interest = self
            .balance
            .checked_mul(self.monthly_rate)
            .ok_or_else(overflow)?;
        let principal = if self.month == self.term {
            self.balance
        } else {
            (self.monthly_payment - interest).max(Decimal::ZERO)
        };
        let total_payment = principal.checked_add(interest).ok_or_else(overflow)?;
        self.balance = (self.balance - principal).max(Decimal::ZERO);

        Ok(LedgerEntry {
            month,
            principal_payment: principal,
            interest_payment: interest,
            total_payment,
            remaining_balance: self.balance,
        })
    }
}

impl Iterator for AmortizationLedger {
    type Item = AmortizationResult<LedgerEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.month >= self.term {
            return None;
        }
        let entry = self.step();
        if entry.is_err() {
            self.month = self.term;
        }
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.term - self.month) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for AmortizationLedger {}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Full dated schedule; row `k` falls due `k` calendar months after `start_date`.
pub fn generate_amortization_schedule(
    terms: &LoanTerms,
    start_date: NaiveDate,
) -> AmortizationResult<Vec<MonthlyPayment>> {
    let ledger = AmortizationLedger::new(terms)?;
    log::debug!(
        "generating {}-month schedule, payment {}",
        terms.loan_term_months(),
        ledger.monthly_payment()
    );

    ledger
        .map(|entry| -> AmortizationResult<MonthlyPayment> {
            let entry = entry?;
            Ok(MonthlyPayment {
                month: entry.month,
                due_date: add_months(start_date, entry.month)?,
                principal_payment: entry.principal_payment,
                interest_payment: entry.interest_payment,
                total_payment: entry.total_payment,
                remaining_balance: entry.remaining_balance,
            })
        })
        .collect()
}

/// Balance reported by schedule row `payments_completed` (0-based index).
///
/// Returns zero once `payments_completed` reaches the term.
pub fn calculate_remaining_balance(
    terms: &LoanTerms,
    payments_completed: u32,
) -> AmortizationResult<Money> {
    if payments_completed >= terms.loan_term_months() {
        return Ok(Decimal::ZERO);
    }
    let entry = AmortizationLedger::new(terms)?
        .nth(payments_completed as usize)
        .transpose()?;
    Ok(entry.map_or(Decimal::ZERO, |e| e.remaining_balance))
}

/// Split of the 1-based `payment_number`; zero for numbers outside the term.
pub fn get_payment_breakdown(
    terms: &LoanTerms,
    payment_number: u32,
) -> AmortizationResult<PaymentBreakdown> {
    if payment_number < 1 || payment_number > terms.loan_term_months() {
        return Ok(PaymentBreakdown::default());
    }
    let entry = AmortizationLedger::new(terms)?
        .nth((payment_number - 1) as usize)
        .transpose()?;
    Ok(entry.map_or_else(PaymentBreakdown::default, |e| PaymentBreakdown {
        principal: e.principal_payment,
        interest: e.interest_payment,
    }))
}

/// Due date of the final payment.
pub fn calculate_payoff_date(
    terms: &LoanTerms,
    start_date: NaiveDate,
) -> AmortizationResult<NaiveDate> {
    add_months(start_date, terms.loan_term_months())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::round_money;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn car_loan() -> LoanTerms {
        LoanTerms::new(dec!(50000), dec!(5), 60).unwrap()
    }

    #[test]
    fn test_schedule_length_and_final_balance() {
        let schedule = generate_amortization_schedule(&car_loan(), start()).unwrap();
        assert_eq!(schedule.len(), 60);
        assert_eq!(schedule.last().unwrap().remaining_balance, Decimal::ZERO);
        assert_eq!(schedule.last().unwrap().month, 60);
    }

    #[test]
    fn test_first_row() {
        let schedule = generate_amortization_schedule(&car_loan(), start()).unwrap();
        let first = &schedule[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.due_date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        // 50000 * 5% / 12 = 208.33
        assert_eq!(round_money(first.interest_payment), dec!(208.33));
        assert_eq!(round_money(first.principal_payment), dec!(735.23));
    }

    #[test]
    fn test_rows_balance() {
        let schedule = generate_amortization_schedule(&car_loan(), start()).unwrap();
        for row in &schedule {
            assert_eq!(row.principal_payment + row.interest_payment, row.total_payment);
            assert!(row.remaining_balance >= Decimal::ZERO);
            assert!(row.principal_payment >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_ledger_is_exact_size() {
        let ledger = AmortizationLedger::new(&car_loan()).unwrap();
        assert_eq!(ledger.len(), 60);
    }

    #[test]
    fn test_remaining_balance_indexes_schedule() {
        let terms = car_loan();
        let schedule = generate_amortization_schedule(&terms, start()).unwrap();
        assert_eq!(
            calculate_remaining_balance(&terms, 12).unwrap(),
            schedule[12].remaining_balance
        );
        assert_eq!(calculate_remaining_balance(&terms, 59).unwrap(), Decimal::ZERO);
        assert_eq!(calculate_remaining_balance(&terms, 60).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_breakdown_out_of_range_is_zero() {
        let terms = car_loan();
        assert_eq!(
            get_payment_breakdown(&terms, 0).unwrap(),
            PaymentBreakdown::default()
        );
        assert_eq!(
            get_payment_breakdown(&terms, 61).unwrap(),
            PaymentBreakdown::default()
        );
    }

    #[test]
    fn test_breakdown_matches_schedule_row() {
        let terms = car_loan();
        let schedule = generate_amortization_schedule(&terms, start()).unwrap();
        let b = get_payment_breakdown(&terms, 60).unwrap();
        assert_eq!(b.principal, schedule[59].principal_payment);
        assert_eq!(b.interest, schedule[59].interest_payment);
    }

    #[test]
    fn test_near_max_principal_schedule_closes() {
        let terms =
            LoanTerms::new(dec!(75_000_000_000_000_000_000_000_000_000), dec!(5), 60).unwrap();
        let schedule = generate_amortization_schedule(&terms, start()).unwrap();
        assert_eq!(schedule.len(), 60);
        assert_eq!(schedule.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_payoff_date() {
        let date = calculate_payoff_date(&car_loan(), start()).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2029, 1, 15).unwrap());
    }

    #[test]
    fn test_due_dates_roll_over_month_end() {
        let terms = LoanTerms::new(dec!(3000), dec!(6), 3).unwrap();
        let jan31 = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        let schedule = generate_amortization_schedule(&terms, jan31).unwrap();
        assert_eq!(schedule[0].due_date, NaiveDate::from_ymd_opt(2023, 3, 3).unwrap());
        assert_eq!(schedule[1].due_date, NaiveDate::from_ymd_opt(2023, 3, 31).unwrap());
        assert_eq!(schedule[2].due_date, NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
    }
}
