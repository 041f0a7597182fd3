//! Envelope entry points: serde inputs in, `ComputationOutput` out. These are
//! what the CLI and the bindings call.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::schedule::{calculate_payoff_date, generate_amortization_schedule, MonthlyPayment};
use crate::summary::{calculate_loan_summary, LoanSummary};
use crate::terms::LoanTerms;
use crate::types::*;
use crate::AmortizationResult;

#[cfg(feature = "early_payoff")]
use crate::early_payoff::{
    calculate_early_payoff_with_options, EarlyPayoffResult, PayoffOptions, PayoffOutcome,
};

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Terms plus the schedule's start date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInput {
    #[serde(flatten)]
    pub terms: LoanTerms,
    pub start_date: NaiveDate,
}

#[cfg(feature = "early_payoff")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyPayoffInput {
    #[serde(flatten)]
    pub terms: LoanTerms,
    pub start_date: NaiveDate,
    pub extra_monthly_payment: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
}

/// Everything the calculator view needs in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanAnalysisInput {
    #[serde(flatten)]
    pub terms: LoanTerms,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_monthly_payment: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutput {
    pub schedule: Vec<MonthlyPayment>,
    /// Sum of the principal column (equals the principal up to dust).
    pub total_principal: Money,
    /// Sum of the interest column.
    pub total_interest: Money,
    pub payoff_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanAnalysis {
    pub summary: LoanSummary,
    pub payoff_date: NaiveDate,
    pub schedule: Vec<MonthlyPayment>,
    #[cfg(feature = "early_payoff")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_payoff: Option<EarlyPayoffResult>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn build_schedule(
    input: &ScheduleInput,
) -> AmortizationResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let warnings = term_warnings(&input.terms);

    let schedule = generate_amortization_schedule(&input.terms, input.start_date)?;
    let total_principal = checked_sum(
        schedule.iter().map(|r| r.principal_payment),
        "schedule principal total",
    )?;
    let total_interest = checked_sum(
        schedule.iter().map(|r| r.interest_payment),
        "schedule interest total",
    )?;

    let output = ScheduleOutput {
        payoff_date: calculate_payoff_date(&input.terms, input.start_date)?,
        schedule,
        total_principal,
        total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Standard Amortization Schedule",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(feature = "early_payoff")]
pub fn project_early_payoff(
    input: &EarlyPayoffInput,
) -> AmortizationResult<ComputationOutput<EarlyPayoffResult>> {
    let start = Instant::now();
    let mut warnings = term_warnings(&input.terms);

    let result = early_payoff_for(
        &input.terms,
        input.extra_monthly_payment,
        input.start_date,
        input.max_iterations,
        &mut warnings,
    )?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Early Payoff Simulation",
        input,
        warnings,
        elapsed,
        result,
    ))
}

pub fn analyze_loan(
    input: &LoanAnalysisInput,
) -> AmortizationResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();
    #[allow(unused_mut)]
    let mut warnings = term_warnings(&input.terms);

    let summary = calculate_loan_summary(&input.terms)?;
    let schedule = generate_amortization_schedule(&input.terms, input.start_date)?;
    let payoff_date = calculate_payoff_date(&input.terms, input.start_date)?;

    #[cfg(feature = "early_payoff")]
    let early_payoff = match input.extra_monthly_payment {
        Some(extra) => Some(early_payoff_for(
            &input.terms,
            extra,
            input.start_date,
            input.max_iterations,
            &mut warnings,
        )?),
        None => None,
    };

    let output = LoanAnalysis {
        summary,
        payoff_date,
        schedule,
        #[cfg(feature = "early_payoff")]
        early_payoff,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Amortization Analysis",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn term_warnings(terms: &LoanTerms) -> Vec<String> {
    let mut warnings = Vec::new();
    if terms.annual_interest_rate() > dec!(100) {
        warnings.push(format!(
            "Annual interest rate of {}% exceeds 100%",
            terms.annual_interest_rate()
        ));
    }
    if terms.principal().is_zero() {
        warnings.push("Principal is zero; every payment is zero".into());
    }
    warnings
}

#[cfg(feature = "early_payoff")]
fn early_payoff_for(
    terms: &LoanTerms,
    extra: Money,
    start_date: NaiveDate,
    max_iterations: Option<u32>,
    warnings: &mut Vec<String>,
) -> AmortizationResult<EarlyPayoffResult> {
    let options = max_iterations
        .map(|max_iterations| PayoffOptions { max_iterations })
        .unwrap_or_default();

    if extra.is_zero() {
        warnings.push("Extra monthly payment is zero; projection equals the standard schedule".into());
    }

    let result = calculate_early_payoff_with_options(terms, extra, start_date, &options)?;
    if result.outcome == PayoffOutcome::IterationCapReached {
        warnings.push(format!(
            "Simulation reached the {}-period cap before the balance was cleared",
            options.max_iterations
        ));
    }
    Ok(result)
}
