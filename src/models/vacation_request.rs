//! Vacation request model and related types.
//!
//! Requests are owned and persisted by the caller; the engine only reads
//! them to compute balances and produces new ones on admission.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The pool a request draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Short, flexible days drawn from the free pool.
    Free,
    /// Days drawn from the 15-day block pool.
    Block,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestType::Free => write!(f, "free"),
            RequestType::Block => write!(f, "block"),
        }
    }
}

impl FromStr for RequestType {
    type Err = EngineError;

    /// Parses a request type case-insensitively.
    ///
    /// ```
    /// use vacation_engine::models::RequestType;
    ///
    /// assert_eq!("Block".parse::<RequestType>().unwrap(), RequestType::Block);
    /// assert!("sick".parse::<RequestType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(RequestType::Free),
            "block" => Ok(RequestType::Block),
            _ => Err(EngineError::InvalidType {
                value: s.to_string(),
            }),
        }
    }
}

/// Status of a vacation request.
///
/// `Pending` is the only non-terminal state; see [`crate::lifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved by an admin or the employee's manager.
    Approved,
    /// Rejected by an admin or the employee's manager.
    Rejected,
    /// Withdrawn by the owning employee.
    Cancelled,
}

impl RequestStatus {
    /// Returns true if requests in this status consume balance.
    pub fn is_active(self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Approved)
    }

    /// Returns true if no further transition is possible.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
            RequestStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A vacation request as stored by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The employee who owns the request.
    pub employee_id: String,
    /// The accrual period (anniversary year) the request draws from.
    pub period: i32,
    /// The pool the request draws from.
    #[serde(rename = "type")]
    pub request_type: RequestType,
    /// Calendar days requested, weekends included.
    pub requested_days: u32,
    /// Saturdays and Sundays inside `[start_date, end_date]`.
    pub weekend_days: u32,
    /// First day of the vacation (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the vacation (inclusive).
    pub end_date: NaiveDate,
    /// Current lifecycle status.
    pub status: RequestStatus,
}

impl VacationRequest {
    /// Returns true if the request counts against the balance.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns true if the request shares at least one day with the range.
    ///
    /// Both ranges are inclusive, so touching on a single day is an overlap.
    ///
    /// ```
    /// use vacation_engine::models::{RequestStatus, RequestType, VacationRequest};
    /// use chrono::NaiveDate;
    ///
    /// let request = VacationRequest {
    ///     id: "req_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     period: 2024,
    ///     request_type: RequestType::Free,
    ///     requested_days: 10,
    ///     weekend_days: 2,
    ///     start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
    ///     status: RequestStatus::Approved,
    /// };
    /// let mar = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
    /// assert!(request.overlaps(mar(10), mar(15)));
    /// assert!(!request.overlaps(mar(11), mar(15)));
    /// ```
    pub fn overlaps(&self, start_date: NaiveDate, end_date: NaiveDate) -> bool {
        self.start_date <= end_date && self.end_date >= start_date
    }
}
