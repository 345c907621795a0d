use chrono::{Days, Months, NaiveDate};

use crate::errors::{RepaymentError, Result};

/// add calendar months, clamping to the last day of shorter months
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| RepaymentError::InvalidDate {
            message: format!("{date} plus {months} months is out of range"),
        })
}

pub fn sub_days(date: NaiveDate, days: u32) -> Result<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(days)))
        .ok_or_else(|| RepaymentError::InvalidDate {
            message: format!("{date} minus {days} days is out of range"),
        })
}

/// signed day count from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_months_simple() {
        assert_eq!(add_months(date(2024, 1, 1), 1).unwrap(), date(2024, 2, 1));
        assert_eq!(add_months(date(2024, 1, 1), 12).unwrap(), date(2025, 1, 1));
    }

    #[test]
    fn test_add_months_clamps_month_end() {
        assert_eq!(add_months(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(add_months(date(2023, 1, 31), 1).unwrap(), date(2023, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 2).unwrap(), date(2024, 3, 31));
    }

    #[test]
    fn test_add_months_out_of_range() {
        assert!(add_months(NaiveDate::MAX, 1).is_err());
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 2, 15)), 45);
        assert_eq!(days_between(date(2024, 2, 15), date(2024, 1, 1)), -45);
        assert_eq!(sub_days(date(2024, 3, 1), 1).unwrap(), date(2024, 2, 29));
    }
}
