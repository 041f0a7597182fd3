use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::AmortizationResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Periodic rates expressed as decimals (0.004167 = 0.4167% per month).
pub type Rate = Decimal;

/// Annual rates as quoted to borrowers (5 = 5% p.a.).
pub type Percent = Decimal;

/// Overflow-checked total of a money column.
pub(crate) fn checked_sum<I>(values: I, context: &str) -> AmortizationResult<Money>
where
    I: IntoIterator<Item = Money>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| AmortizationError::overflow(context))
    })
}

/// Currency used when rendering amounts. The engine itself is currency-agnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    USD,
    PHP,
    EUR,
    GBP,
    Other(String),
}

impl Currency {
    /// Prefix placed before the formatted amount.
    pub fn symbol(&self) -> String {
        match self {
            Currency::USD => "$".into(),
            Currency::PHP => "₱".into(),
            Currency::EUR => "€".into(),
            Currency::GBP => "£".into(),
            Currency::Other(code) => format!("{code} "),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
