use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use amortization_core::analysis::{self, EarlyPayoffInput, LoanAnalysisInput, ScheduleInput};
use amortization_core::format::format_currency;
use amortization_core::rounding::round_money;
use amortization_core::{payment, schedule, summary, LoanTerms};

use crate::input;

// ---------------------------------------------------------------------------
// Shared arguments
// ---------------------------------------------------------------------------

/// Loan terms given as flags, a request file, or piped JSON
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5 for 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Loan start date (YYYY-MM-DD); the first payment falls due one month later. Defaults to today
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

/// Terms plus start date, as read from a request file or stdin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TermsRequest {
    #[serde(flatten)]
    terms: LoanTerms,
    #[serde(default)]
    start_date: Option<NaiveDate>,
}

impl LoanArgs {
    fn terms_from_flags(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let term = self
            .term_months
            .ok_or("--term-months is required (or provide --input)")?;
        Ok(LoanTerms::new(principal, rate, term)?)
    }

    fn start_date_or_today(&self) -> NaiveDate {
        self.start_date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Resolve terms and start date from file, stdin, then flags.
    fn resolve(&self) -> Result<(LoanTerms, NaiveDate), Box<dyn std::error::Error>> {
        match input::read_request::<TermsRequest>(self.input.as_deref())? {
            Some(req) => {
                let start = req.start_date.unwrap_or_else(|| self.start_date_or_today());
                Ok((req.terms, start))
            }
            None => Ok((self.terms_from_flags()?, self.start_date_or_today())),
        }
    }
}

// ---------------------------------------------------------------------------
// Payment / summary / payoff date
// ---------------------------------------------------------------------------

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (terms, _) = args.resolve()?;
    let pmt = payment::calculate_monthly_payment(&terms)?;
    Ok(json!({
        "monthlyPayment": round_money(pmt),
        "unrounded": pmt,
        "formatted": format_currency(pmt),
    }))
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (terms, _) = args.resolve()?;
    let result = summary::calculate_loan_summary(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_payoff_date(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (terms, start) = args.resolve()?;
    let date = schedule::calculate_payoff_date(&terms, start)?;
    Ok(json!({ "startDate": start, "payoffDate": date }))
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (terms, start_date) = args.loan.resolve()?;
    let result = analysis::build_schedule(&ScheduleInput { terms, start_date })?;
    Ok(serde_json::to_value(result)?)
}

// ---------------------------------------------------------------------------
// Balance / breakdown
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BalanceArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Number of payments already made
    #[arg(long, default_value_t = 0)]
    pub payments_completed: u32,
}

pub fn run_balance(args: BalanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (terms, _) = args.loan.resolve()?;
    let balance = schedule::calculate_remaining_balance(&terms, args.payments_completed)?;
    Ok(json!({
        "paymentsCompleted": args.payments_completed,
        "remainingBalance": round_money(balance),
        "formatted": format_currency(balance),
    }))
}

#[derive(Args)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// 1-based payment number
    #[arg(long)]
    pub payment_number: u32,
}

pub fn run_breakdown(args: BreakdownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (terms, _) = args.loan.resolve()?;
    let b = schedule::get_payment_breakdown(&terms, args.payment_number)?;
    Ok(json!({
        "paymentNumber": args.payment_number,
        "principal": round_money(b.principal),
        "interest": round_money(b.interest),
    }))
}

// ---------------------------------------------------------------------------
// Early payoff / full analysis
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct EarlyPayoffArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Extra amount paid on top of the standard payment each month
    #[arg(long)]
    pub extra: Option<Decimal>,

    /// Simulation cap in months (default 600)
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

pub fn run_early_payoff(args: EarlyPayoffArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = input::read_request::<EarlyPayoffInput>(args.loan.input.as_deref())?;
    let ep_input = match request {
        Some(req) => req,
        None => EarlyPayoffInput {
            terms: args.loan.terms_from_flags()?,
            start_date: args.loan.start_date_or_today(),
            extra_monthly_payment: args
                .extra
                .ok_or("--extra is required (or provide --input)")?,
            max_iterations: args.max_iterations,
        },
    };
    let result = analysis::project_early_payoff(&ep_input)?;
    Ok(serde_json::to_value(result)?)
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Optional extra monthly payment to project
    #[arg(long)]
    pub extra: Option<Decimal>,

    /// Simulation cap in months (default 600)
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = input::read_request::<LoanAnalysisInput>(args.loan.input.as_deref())?;
    let analysis_input = match request {
        Some(req) => req,
        None => LoanAnalysisInput {
            terms: args.loan.terms_from_flags()?,
            start_date: args.loan.start_date_or_today(),
            extra_monthly_payment: args.extra,
            max_iterations: args.max_iterations,
        },
    };
    let result = analysis::analyze_loan(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}
