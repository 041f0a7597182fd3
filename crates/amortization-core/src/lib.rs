pub mod analysis;
pub mod calendar;
pub mod error;
pub mod payment;
pub mod rounding;
pub mod schedule;
pub mod summary;
pub mod terms;
pub mod types;

#[cfg(feature = "early_payoff")]
pub mod early_payoff;

#[cfg(feature = "formatting")]
pub mod format;

pub use error::AmortizationError;
pub use payment::calculate_monthly_payment;
pub use schedule::{
    calculate_payoff_date, calculate_remaining_balance, generate_amortization_schedule,
    get_payment_breakdown, MonthlyPayment, PaymentBreakdown,
};
pub use summary::{calculate_loan_summary, LoanSummary};
pub use terms::LoanTerms;
pub use types::*;

#[cfg(feature = "early_payoff")]
pub use early_payoff::{calculate_early_payoff, EarlyPayoffResult, PayoffOptions, PayoffOutcome};

#[cfg(feature = "formatting")]
pub use format::{format_currency, format_currency_in, format_percentage};

/// Standard result type for all amortization operations
pub type AmortizationResult<T> = Result<T, AmortizationError>;
