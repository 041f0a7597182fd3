//! Accelerated amortization: the standard payment plus a fixed extra amount
//! each month, simulated until the balance is cleared or the iteration cap
//! is reached.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar::add_months;
use crate::error::AmortizationError;
use crate::payment::calculate_monthly_payment;
use crate::rounding::round_money;
use crate::summary::standard_total_interest;
use crate::terms::LoanTerms;
use crate::types::{checked_sum, Money, Rate};
use crate::AmortizationResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// 50 years of monthly periods.
pub const DEFAULT_MAX_ITERATIONS: u32 = 600;

/// Residual balance treated as settled. Decimal division leaves dust in the
/// 20th+ decimal place that would otherwise cost an extra period.
const BALANCE_DUST: Decimal = dec!(0.000001);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffOptions {
    /// Hard bound on simulated periods.
    pub max_iterations: u32,
}

impl Default for PayoffOptions {
    fn default() -> Self {
        PayoffOptions {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// How the simulation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffOutcome {
    /// Balance reached zero.
    PaidOff,
    /// `max_iterations` periods elapsed with a balance still outstanding.
    IterationCapReached,
}

/// One simulated period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoffPeriod {
    pub month: u32,
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyPayoffResult {
    pub months_to_payoff: u32,
    /// Periods saved against the contractual term; zero when the cap was hit.
    pub months_saved: u32,
    pub interest_saved: Money,
    pub new_total_cost: Money,
    /// Due date of the last simulated payment.
    pub payoff_date: NaiveDate,
    pub outcome: PayoffOutcome,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Bounded iterator over accelerated payment periods.
///
/// Stops after the period that clears the balance, or after
/// `max_iterations` periods, whichever comes first.
#[derive(Debug, Clone)]
pub struct PayoffSimulation {
    payment: Money,
    monthly_rate: Rate,
    balance: Money,
    month: u32,
    max_iterations: u32,
}

impl PayoffSimulation {
    pub fn new(
        terms: &LoanTerms,
        extra_monthly_payment: Money,
        options: &PayoffOptions,
    ) -> AmortizationResult<Self> {
        if extra_monthly_payment < Decimal::ZERO {
            return Err(AmortizationError::InvalidInput {
                field: "extra_monthly_payment".into(),
                reason: "Extra monthly payment cannot be negative".into(),
            });
        }
        if options.max_iterations == 0 {
            return Err(AmortizationError::InvalidInput {
                field: "max_iterations".into(),
                reason: "Simulation needs at least one iteration".into(),
            });
        }

        let payment = calculate_monthly_payment(terms)?
            .checked_add(extra_monthly_payment)
            .ok_or_else(|| {
                AmortizationError::overflow(format!(
                    "monthly payment plus extra {extra_monthly_payment}"
                ))
            })?;

        Ok(PayoffSimulation {
            payment,
            monthly_rate: terms.monthly_rate(),
            balance: terms.principal(),
            month: 0,
            max_iterations: options.max_iterations,
        })
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance <= Decimal::ZERO
    }

    pub fn months_elapsed(&self) -> u32 {
        self.month
    }

    pub fn outcome(&self) -> PayoffOutcome {
        if self.is_paid_off() {
            PayoffOutcome::PaidOff
        } else {
            PayoffOutcome::IterationCapReached
        }
    }
}

impl Iterator for PayoffSimulation {
    type Item = PayoffPeriod;

    fn next(&mut self) -> Option<PayoffPeriod> {
        if self.is_paid_off() || self.month >= self.max_iterations {
            return None;
        }
        self.month += 1;

        // balance <= principal, and principal × rate fit when the payment was computed
        let interest = self.balance * self.monthly_rate;
        let mut principal = (self.payment - interest).min(self.balance);
        if self.balance - principal <= BALANCE_DUST {
            principal = self.balance;
        }
        self.balance -= principal;

        Some(PayoffPeriod {
            month: self.month,
            interest,
            principal,
            balance: self.balance,
        })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Early-payoff projection with the default 600-period cap.
pub fn calculate_early_payoff(
    terms: &LoanTerms,
    extra_monthly_payment: Money,
    start_date: NaiveDate,
) -> AmortizationResult<EarlyPayoffResult> {
    calculate_early_payoff_with_options(
        terms,
        extra_monthly_payment,
        start_date,
        &PayoffOptions::default(),
    )
}

pub fn calculate_early_payoff_with_options(
    terms: &LoanTerms,
    extra_monthly_payment: Money,
    start_date: NaiveDate,
    options: &PayoffOptions,
) -> AmortizationResult<EarlyPayoffResult> {
    let mut simulation = PayoffSimulation::new(terms, extra_monthly_payment, options)?;
    log::debug!(
        "simulating payoff of {} with extra {} (cap {})",
        terms.principal(),
        extra_monthly_payment,
        options.max_iterations
    );

    let simulated_interest = checked_sum(
        simulation.by_ref().map(|p| p.interest),
        "simulated interest total",
    )?;
    let months_to_payoff = simulation.months_elapsed();
    let outcome = simulation.outcome();

    if outcome == PayoffOutcome::IterationCapReached {
        log::warn!(
            "payoff simulation stopped at {} periods with balance outstanding",
            months_to_payoff
        );
    }

    let interest_saved = standard_total_interest(terms)? - simulated_interest;
    let new_total_cost = terms
        .principal()
        .checked_add(simulated_interest)
        .ok_or_else(|| AmortizationError::overflow("early payoff total cost"))?;
    let months_saved = match outcome {
        PayoffOutcome::PaidOff => terms.loan_term_months().saturating_sub(months_to_payoff),
        PayoffOutcome::IterationCapReached => 0,
    };

    Ok(EarlyPayoffResult {
        months_to_payoff,
        months_saved,
        interest_saved: round_money(interest_saved),
        new_total_cost: round_money(new_total_cost),
        payoff_date: add_months(start_date, months_to_payoff)?,
        outcome,
    })
}
