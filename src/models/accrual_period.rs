//! Accrual period and balance models.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Age classification of a period relative to the as-of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// The anniversary is two or more years old.
    Expired,
    /// A completed period inside its usage year.
    Pending,
    /// The open, still-accruing period.
    Current,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Expired => write!(f, "expired"),
            Bucket::Pending => write!(f, "pending"),
            Bucket::Current => write!(f, "current"),
        }
    }
}

/// One anniversary year of vacation entitlement.
///
/// Before deduction `free_days + block_days` is the accrued entitlement;
/// after the ledger runs they are the remaining balance.
///
/// # Example
///
/// ```
/// use vacation_engine::models::{AccrualPeriod, Bucket};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = AccrualPeriod {
///     year: 2023,
///     period_start: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
///     free_days: Decimal::new(15, 0),
///     block_days: Decimal::new(15, 0),
///     bucket: Bucket::Pending,
/// };
/// assert_eq!(period.total_days(), Decimal::new(30, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualPeriod {
    /// Calendar year the period's anniversary falls in.
    pub year: i32,
    /// Hire date advanced by whole years.
    pub period_start: NaiveDate,
    /// Days usable individually.
    pub free_days: Decimal,
    /// Days reserved for the contiguous block (at most 15).
    pub block_days: Decimal,
    /// Age classification for reporting.
    pub bucket: Bucket,
}

impl AccrualPeriod {
    /// Free plus block days.
    pub fn total_days(&self) -> Decimal {
        self.free_days + self.block_days
    }
}

/// The post-deduction periods of one employee, ordered by year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance {
    periods: Vec<AccrualPeriod>,
}

impl Balance {
    /// Creates a balance, ordering periods by year.
    pub fn new(mut periods: Vec<AccrualPeriod>) -> Self {
        periods.sort_by_key(|p| p.year);
        Self { periods }
    }

    /// Looks up the period for a year.
    pub fn get(&self, year: i32) -> Option<&AccrualPeriod> {
        self.periods.iter().find(|p| p.year == year)
    }

    /// All periods, oldest first.
    pub fn periods(&self) -> &[AccrualPeriod] {
        &self.periods
    }

    /// Remaining free days across all periods.
    pub fn total_free_days(&self) -> Decimal {
        self.periods.iter().map(|p| p.free_days).sum()
    }

    /// Remaining block days across all periods.
    pub fn total_block_days(&self) -> Decimal {
        self.periods.iter().map(|p| p.block_days).sum()
    }
}
