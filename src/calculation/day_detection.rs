//! Day detection and calendar helpers.
//!
//! This module classifies calendar days as weekday, Saturday or Sunday and
//! counts weekend days inside inclusive date ranges, which feeds both the
//! weekend-compensation rule and the weekend-only admission checks.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Represents the type of day.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(format!("{:?}", day_type), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayType {
    /// Returns true for Saturday and Sunday.
    pub fn is_weekend(self) -> bool {
        !matches!(self, DayType::Weekday)
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Determines the day type for a given date.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::{get_day_type, DayType};
/// use chrono::NaiveDate;
///
/// // 2026-01-17 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(get_day_type(saturday), DayType::Saturday);
///
/// // 2026-01-12 is a Monday
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// assert_eq!(get_day_type(monday), DayType::Weekday);
/// ```
pub fn get_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// Iterates the days of the inclusive range `[start, end]`.
///
/// Yields nothing when `start > end`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Counts Saturdays and Sundays in the inclusive range `[start, end]`.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::count_weekend_days;
/// use chrono::NaiveDate;
///
/// // Monday 2024-03-04 through Sunday 2024-03-17: two full weeks
/// let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
/// assert_eq!(count_weekend_days(start, end), 4);
/// ```
pub fn count_weekend_days(start: NaiveDate, end: NaiveDate) -> u32 {
    days_in_range(start, end)
        .filter(|d| get_day_type(*d).is_weekend())
        .count() as u32
}

/// Returns true if every day of `[start, end]` is a Saturday or Sunday.
///
/// An empty range is not weekend-only.
pub fn is_weekend_only(start: NaiveDate, end: NaiveDate) -> bool {
    start <= end && days_in_range(start, end).all(|d| get_day_type(d).is_weekend())
}

/// Number of days in a calendar year (365 or 366).
pub fn days_in_year(year: i32) -> u32 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}
