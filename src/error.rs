//! Error types for the Vacation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Most variants are validation rejections the caller can recover from and
//! show to the user; [`EngineError::CalendarOverflow`] and the configuration
//! variants are faults the caller cannot fix by changing its input.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::RequestStatus;

/// The main error type for the Vacation Engine.
///
/// # Example
///
/// ```
/// use vacation_engine::error::EngineError;
///
/// let error = EngineError::PeriodNotFound { period: 2019 };
/// assert_eq!(error.to_string(), "No accrual period found for year 2019");
/// assert!(error.is_validation());
/// assert_eq!(error.code(), "PERIOD_NOT_FOUND");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A date range was inverted (start after end, or as-of before hire).
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// The earlier bound as supplied.
        start: NaiveDate,
        /// The later bound as supplied.
        end: NaiveDate,
    },

    /// The request itself is malformed (e.g. a non-positive day count).
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// A description of what made the request invalid.
        message: String,
    },

    /// The request type is not one of the known pools.
    #[error("Invalid request type '{value}': expected 'free' or 'block'")]
    InvalidType {
        /// The type as supplied by the caller.
        value: String,
    },

    /// The request starts before today.
    #[error("Start date {start_date} is in the past (today is {today})")]
    PastDateNotAllowed {
        /// The requested start date.
        start_date: NaiveDate,
        /// The date the request was evaluated on.
        today: NaiveDate,
    },

    /// Requests starting this month are closed after the cutoff day.
    #[error(
        "Requests starting in the current month must be submitted by day {cutoff_day} (today is day {today_day})"
    )]
    MonthlyCutoffExceeded {
        /// The configured cutoff day of month.
        cutoff_day: u32,
        /// Today's day of month.
        today_day: u32,
    },

    /// The request shares at least one day with an active request.
    #[error("Request overlaps existing request '{existing_id}' ({existing_start} to {existing_end})")]
    OverlappingRequest {
        /// The ID of the conflicting request.
        existing_id: String,
        /// The conflicting request's start date.
        existing_start: NaiveDate,
        /// The conflicting request's end date.
        existing_end: NaiveDate,
    },

    /// The request contains no business day.
    #[error("Request from {start_date} to {end_date} covers only weekend days")]
    WeekendOnlyNotAllowed {
        /// The requested start date.
        start_date: NaiveDate,
        /// The requested end date.
        end_date: NaiveDate,
    },

    /// Not enough free days remain in the period.
    #[error("Insufficient free days in period {period}: requested {requested}, available {available}")]
    InsufficientFreeBalance {
        /// The period the request draws from.
        period: i32,
        /// Days requested.
        requested: u32,
        /// Remaining free days (fractional).
        available: String,
    },

    /// Not enough block days remain in the period.
    #[error("Insufficient block days in period {period}: requested {requested}, available {available}")]
    InsufficientBlockBalance {
        /// The period the request draws from.
        period: i32,
        /// Days requested.
        requested: u32,
        /// Remaining block days (fractional).
        available: String,
    },

    /// The candidate's period has no accrual record.
    #[error("No accrual period found for year {period}")]
    PeriodNotFound {
        /// The requested period year.
        period: i32,
    },

    /// A lifecycle transition that is not permitted.
    #[error("Cannot move request '{request_id}' from {from} to {to}: {reason}")]
    InvalidStateTransition {
        /// The request being transitioned.
        request_id: String,
        /// The current status.
        from: RequestStatus,
        /// The attempted target status.
        to: RequestStatus,
        /// Why the transition was refused.
        reason: String,
    },

    /// Calendar arithmetic left the representable date range.
    #[error("Calendar arithmetic overflow: {message}")]
    CalendarOverflow {
        /// The operation that overflowed.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its values are inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },
}

impl EngineError {
    /// Returns true for the recoverable validation taxonomy.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            EngineError::CalendarOverflow { .. }
                | EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
                | EngineError::InvalidConfig { .. }
        )
    }

    /// A stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            EngineError::InvalidRequest { .. } => "INVALID_REQUEST",
            EngineError::InvalidType { .. } => "INVALID_TYPE",
            EngineError::PastDateNotAllowed { .. } => "PAST_DATE_NOT_ALLOWED",
            EngineError::MonthlyCutoffExceeded { .. } => "MONTHLY_CUTOFF_EXCEEDED",
            EngineError::OverlappingRequest { .. } => "OVERLAPPING_REQUEST",
            EngineError::WeekendOnlyNotAllowed { .. } => "WEEKEND_ONLY_NOT_ALLOWED",
            EngineError::InsufficientFreeBalance { .. } => "INSUFFICIENT_FREE_BALANCE",
            EngineError::InsufficientBlockBalance { .. } => "INSUFFICIENT_BLOCK_BALANCE",
            EngineError::PeriodNotFound { .. } => "PERIOD_NOT_FOUND",
            EngineError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            EngineError::CalendarOverflow { .. } => "CALENDAR_OVERFLOW",
            EngineError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            EngineError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            EngineError::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }

    pub(crate) fn overflow(message: impl Into<String>) -> Self {
        EngineError::CalendarOverflow {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
