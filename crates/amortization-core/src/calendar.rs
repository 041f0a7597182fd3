use chrono::{Datelike, Days, NaiveDate};

use crate::error::AmortizationError;
use crate::AmortizationResult;

/// Advance `date` by `months` calendar months.
///
/// The month field is incremented and the day is kept; days past the end of
/// the target month roll into the next one (Jan 31 + 1 month = Mar 3, or
/// Mar 2 in a leap year). Due dates therefore never drift when chained from
/// the same start date.
pub fn add_months(date: NaiveDate, months: u32) -> AmortizationResult<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12))
        .map_err(|_| AmortizationError::DateError(format!("{date} + {months} months")))?;
    let month = total.rem_euclid(12) as u32 + 1;

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day() - 1))))
        .ok_or_else(|| {
            AmortizationError::DateError(format!(
                "{date} + {months} months is outside the supported calendar range"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_plain_increment() {
        assert_eq!(add_months(d(2024, 1, 15), 1).unwrap(), d(2024, 2, 15));
        assert_eq!(add_months(d(2024, 1, 15), 0).unwrap(), d(2024, 1, 15));
    }

    #[test]
    fn test_year_wrap() {
        assert_eq!(add_months(d(2024, 11, 10), 3).unwrap(), d(2025, 2, 10));
        assert_eq!(add_months(d(2024, 1, 1), 60).unwrap(), d(2029, 1, 1));
    }

    #[test]
    fn test_month_end_overflow_rolls_forward() {
        // Feb 31 does not exist: spills three days into March
        assert_eq!(add_months(d(2023, 1, 31), 1).unwrap(), d(2023, 3, 3));
        // Leap year: Feb has 29 days
        assert_eq!(add_months(d(2024, 1, 31), 1).unwrap(), d(2024, 3, 2));
        assert_eq!(add_months(d(2024, 3, 31), 1).unwrap(), d(2024, 5, 1));
        assert_eq!(add_months(d(2024, 1, 31), 2).unwrap(), d(2024, 3, 31));
    }

    #[test]
    fn test_out_of_range() {
        assert!(add_months(NaiveDate::MAX, 1).is_err());
    }
}
