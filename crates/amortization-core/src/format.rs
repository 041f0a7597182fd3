use rust_decimal::Decimal;

use crate::rounding::{round_money, round_to, MONEY_DP};
use crate::types::{Currency, Money, Percent};

/// US-style currency string: `$1,234.56`, negatives as `-$1,234.56`.
pub fn format_currency(amount: Money) -> String {
    format_currency_in(amount, &Currency::USD)
}

/// Currency string with the given currency's symbol, e.g. `₱1,234.56`.
pub fn format_currency_in(amount: Money, currency: &Currency) -> String {
    let rounded = round_money(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{}{}",
        currency.symbol(),
        group_thousands(rounded.abs(), MONEY_DP)
    )
}

/// Percentage with a fixed number of decimals: `5` -> `"5.00%"`.
///
/// `value` is already in percent units.
pub fn format_percentage(value: Percent, decimals: u32) -> String {
    let rounded = round_to(value, decimals);
    format!("{rounded:.prec$}%", prec = decimals as usize)
}

fn group_thousands(value: Decimal, decimals: u32) -> String {
    let fixed = format!("{value:.prec$}", prec = decimals as usize);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}
