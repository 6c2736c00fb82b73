//! Time types and business-day grids.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `business_days`: Weekday grid between two dates (inclusive)
//! - `BUSINESS_DAY_STEP`: the 1/253 trading-day clock used for simulation
//!   time steps
//!
//! # Examples
//!
//! ```
//! use heston_core::types::time::{business_days, Date, BUSINESS_DAY_STEP};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 1, 31).unwrap();
//!
//! let grid = business_days(start, end).unwrap();
//! assert_eq!(grid.len(), 23);
//!
//! // 22 business-day steps of 1/253 each
//! let horizon = (grid.len() - 1) as f64 * BUSINESS_DAY_STEP;
//! assert!((horizon - 22.0 / 253.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::{DateError, PricingError};

/// Business days per year.
pub const BUSINESS_DAYS_PER_YEAR: f64 = 253.0;

/// Length of one business day in years, `1 / 253`.
pub const BUSINESS_DAY_STEP: f64 = 1.0 / BUSINESS_DAYS_PER_YEAR;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and standard date arithmetic.
///
/// # Examples
///
/// ```
/// use heston_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
/// assert!(!date.is_business_day()); // Saturday
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// ```
    /// use heston_core::types::time::Date;
    ///
    /// assert!(Date::parse("2024-06-15").is_ok());
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{s}: {e}")))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Monday to Friday. No holiday calendar is applied.
    pub fn is_business_day(&self) -> bool {
        !matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// The following calendar day, or `None` at the end of chrono's range.
    pub fn succ(&self) -> Option<Date> {
        self.0.succ_opt().map(Date)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of calendar days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Returns every business day in `[start, end]`, ascending.
///
/// Endpoints are included when they are themselves business days. An empty
/// vector is returned when the range contains no weekday (e.g. a single
/// weekend); callers that need a minimum grid size check the length.
///
/// # Errors
///
/// `PricingError::InvalidRange` if `end < start`.
///
/// # Examples
///
/// ```
/// use heston_core::types::time::{business_days, Date};
///
/// // Friday to Monday: the weekend is skipped
/// let fri = Date::from_ymd(2024, 1, 5).unwrap();
/// let mon = Date::from_ymd(2024, 1, 8).unwrap();
/// assert_eq!(business_days(fri, mon).unwrap(), vec![fri, mon]);
/// ```
pub fn business_days(start: Date, end: Date) -> Result<Vec<Date>, PricingError> {
    if end < start {
        return Err(PricingError::InvalidRange(format!(
            "end date {end} precedes start date {start}"
        )));
    }

    let capacity = usize::try_from(end - start).unwrap_or(0) + 1;
    let mut grid = Vec::with_capacity(capacity);
    let mut current = Some(start);
    while let Some(date) = current {
        if date > end {
            break;
        }
        if date.is_business_day() {
            grid.push(date);
        }
        current = date.succ();
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_date_parse_and_display() {
        let date = Date::parse("2024-02-29").unwrap();
        assert_eq!(date.to_string(), "2024-02-29");
        assert!(Date::parse("2023-02-29").is_err());
        assert!(matches!(
            Date::from_ymd(2024, 13, 1),
            Err(DateError::InvalidDate { month: 13, .. })
        ));
    }

    #[test]
    fn test_is_business_day() {
        assert!(ymd(2024, 1, 5).is_business_day()); // Friday
        assert!(!ymd(2024, 1, 6).is_business_day()); // Saturday
        assert!(!ymd(2024, 1, 7).is_business_day()); // Sunday
        assert!(ymd(2024, 1, 8).is_business_day()); // Monday
    }

    #[test]
    fn test_business_days_single_day() {
        let d = ymd(2024, 1, 3);
        assert_eq!(business_days(d, d).unwrap(), vec![d]);

        let sat = ymd(2024, 1, 6);
        assert!(business_days(sat, sat).unwrap().is_empty());
    }

    #[test]
    fn test_business_days_reversed_range() {
        let result = business_days(ymd(2024, 1, 10), ymd(2024, 1, 1));
        assert!(matches!(result, Err(PricingError::InvalidRange(_))));
    }

    #[test]
    fn test_business_days_full_year() {
        let grid = business_days(ymd(2024, 1, 1), ymd(2024, 12, 31)).unwrap();
        // 2024 has 262 weekdays
        assert_eq!(grid.len(), 262);
        assert_eq!(grid.first(), Some(&ymd(2024, 1, 1)));
        assert_eq!(grid.last(), Some(&ymd(2024, 12, 31)));
    }

    #[test]
    fn test_business_day_step() {
        assert_relative_eq!(BUSINESS_DAY_STEP * BUSINESS_DAYS_PER_YEAR, 1.0);
        assert_relative_eq!(BUSINESS_DAY_STEP, 1.0 / 253.0, epsilon = 1e-15);
        assert_eq!(ymd(2024, 3, 1) - ymd(2024, 2, 1), 29);
    }

    fn date_strategy() -> impl Strategy<Value = Date> {
        (2000i32..2040, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| ymd(y, m, d))
    }

    proptest! {
        #[test]
        fn prop_business_grid_is_sorted_weekdays(start in date_strategy(), span in 0i64..400) {
            let end = Date::from(start.into_inner() + chrono::Duration::days(span));
            let grid = business_days(start, end).unwrap();

            prop_assert!(grid.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(grid.iter().all(|d| d.is_business_day()));
            prop_assert!(grid.iter().all(|d| *d >= start && *d <= end));
            prop_assert_eq!(grid.first() == Some(&start), start.is_business_day());
            prop_assert_eq!(grid.last() == Some(&end), end.is_business_day());
        }
    }
}
