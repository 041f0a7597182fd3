use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use amortization_core::format::{format_currency_in, format_percentage};
use amortization_core::Currency;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CurrencyChoice {
    Usd,
    Php,
    Eur,
    Gbp,
}

impl From<CurrencyChoice> for Currency {
    fn from(choice: CurrencyChoice) -> Self {
        match choice {
            CurrencyChoice::Usd => Currency::USD,
            CurrencyChoice::Php => Currency::PHP,
            CurrencyChoice::Eur => Currency::EUR,
            CurrencyChoice::Gbp => Currency::GBP,
        }
    }
}

/// Arguments for currency formatting
#[derive(Args)]
pub struct CurrencyArgs {
    /// Amount to format
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Decimal,

    /// Currency symbol to use
    #[arg(long, value_enum, default_value = "usd")]
    pub currency: CurrencyChoice,
}

pub fn run_format_currency(args: CurrencyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let currency: Currency = args.currency.into();
    Ok(json!({ "formatted": format_currency_in(args.amount, &currency) }))
}

/// Arguments for percentage formatting
#[derive(Args)]
pub struct PercentageArgs {
    /// Value in percent units (5 => "5.00%")
    #[arg(long, allow_hyphen_values = true)]
    pub value: Decimal,

    /// Decimal places
    #[arg(long, default_value_t = 2)]
    pub decimals: u32,
}

pub fn run_format_percentage(args: PercentageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(json!({ "formatted": format_percentage(args.value, args.decimals) }))
}
