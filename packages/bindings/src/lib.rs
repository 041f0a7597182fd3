use std::str::FromStr;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use amortization_core::analysis::{EarlyPayoffInput, LoanAnalysisInput, ScheduleInput};
use amortization_core::{Currency, LoanTerms};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, raw: &str) -> NapiResult<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| to_napi_error(format!("Invalid {field} '{raw}': {e}")))
}

fn parse_currency(code: Option<String>) -> Currency {
    match code.as_deref().map(str::to_ascii_uppercase).as_deref() {
        None | Some("USD") => Currency::USD,
        Some("PHP") => Currency::PHP,
        Some("EUR") => Currency::EUR,
        Some("GBP") => Currency::GBP,
        Some(other) => Currency::Other(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Engine operations
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_monthly_payment(terms_json: String) -> NapiResult<String> {
    let terms: LoanTerms = serde_json::from_str(&terms_json).map_err(to_napi_error)?;
    let payment =
        amortization_core::calculate_monthly_payment(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&payment).map_err(to_napi_error)
}

#[napi]
pub fn generate_amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: ScheduleInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule =
        amortization_core::generate_amortization_schedule(&input.terms, input.start_date)
            .map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

#[napi]
pub fn calculate_loan_summary(terms_json: String) -> NapiResult<String> {
    let terms: LoanTerms = serde_json::from_str(&terms_json).map_err(to_napi_error)?;
    let summary = amortization_core::calculate_loan_summary(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&summary).map_err(to_napi_error)
}

#[napi]
pub fn calculate_remaining_balance(terms_json: String, payments_completed: u32) -> NapiResult<String> {
    let terms: LoanTerms = serde_json::from_str(&terms_json).map_err(to_napi_error)?;
    let balance = amortization_core::calculate_remaining_balance(&terms, payments_completed)
        .map_err(to_napi_error)?;
    serde_json::to_string(&balance).map_err(to_napi_error)
}

#[napi]
pub fn get_payment_breakdown(terms_json: String, payment_number: u32) -> NapiResult<String> {
    let terms: LoanTerms = serde_json::from_str(&terms_json).map_err(to_napi_error)?;
    let breakdown = amortization_core::get_payment_breakdown(&terms, payment_number)
        .map_err(to_napi_error)?;
    serde_json::to_string(&breakdown).map_err(to_napi_error)
}

#[napi]
pub fn calculate_payoff_date(input_json: String) -> NapiResult<String> {
    let input: ScheduleInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let date = amortization_core::calculate_payoff_date(&input.terms, input.start_date)
        .map_err(to_napi_error)?;
    Ok(date.to_string())
}

#[napi]
pub fn calculate_early_payoff(input_json: String) -> NapiResult<String> {
    let input: EarlyPayoffInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let options = input
        .max_iterations
        .map(|max_iterations| amortization_core::PayoffOptions { max_iterations })
        .unwrap_or_default();
    let result = amortization_core::early_payoff::calculate_early_payoff_with_options(
        &input.terms,
        input.extra_monthly_payment,
        input.start_date,
        &options,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&result).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let input: LoanAnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization_core::analysis::analyze_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: ScheduleInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization_core::analysis::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_early_payoff(input_json: String) -> NapiResult<String> {
    let input: EarlyPayoffInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        amortization_core::analysis::project_early_payoff(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(amount: String, currency: Option<String>) -> NapiResult<String> {
    let amount = parse_decimal("amount", &amount)?;
    Ok(amortization_core::format_currency_in(
        amount,
        &parse_currency(currency),
    ))
}

#[napi]
pub fn format_percentage(value: String, decimals: Option<u32>) -> NapiResult<String> {
    let value = parse_decimal("value", &value)?;
    Ok(amortization_core::format_percentage(
        value,
        decimals.unwrap_or(2),
    ))
}
