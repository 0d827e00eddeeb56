//! Calculation logic for the Vacation Engine.
//!
//! This module contains the entitlement and balance rules: day detection
//! for weekend handling, anniversary-based period accrual with proration of
//! the open year, period classification, the weekend-compensation table,
//! the balance ledger, the composed balance pipeline, and request admission.

mod admission;
mod balance;
mod balance_ledger;
mod day_detection;
mod period_accrual;
mod period_classifier;
mod weekend_compensation;

pub use admission::{CandidateRequest, admit_request, validate_request};
pub use balance::{BalanceReport, compute_balance};
pub use balance_ledger::{LedgerResult, PeriodCharge, apply_requests};
pub use day_detection::{
    DayType, count_weekend_days, days_in_range, days_in_year, get_day_type, is_weekend_only,
};
pub use period_accrual::{
    ANNUAL_ENTITLEMENT_DAYS, AccrualResult, BLOCK_DAYS_CAP, anniversary,
    calculate_accrual_periods, split_entitlement,
};
pub use period_classifier::{ClassificationResult, classify_anniversary, classify_periods};
pub use weekend_compensation::weekend_compensation;
