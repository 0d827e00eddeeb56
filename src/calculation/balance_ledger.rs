//! Balance ledger.
//!
//! Subtracts the days consumed by active requests from each accrual period.
//! Free-day requests are charged by business day plus the weekend
//! compensation; block requests are charged by calendar day. Remaining
//! balances floor at zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WeekendCompensationTable;
use crate::models::{AccrualPeriod, AuditStep, RequestType, VacationRequest};

use super::weekend_compensation::weekend_compensation;

/// Days charged against one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCharge {
    /// Calendar days requested as free days.
    pub free_requested: u32,
    /// Weekend days inside the free-day requests.
    pub weekend_days: u32,
    /// Free days requested minus weekend days, floored at zero.
    pub business_days: u32,
    /// Extra days from the compensation table.
    pub compensation: u32,
    /// Total days requested from the block pool.
    pub block_requested: u32,
}

impl PeriodCharge {
    /// Totals the active requests that draw from `year`.
    pub fn for_period(
        year: i32,
        requests: &[VacationRequest],
        table: &WeekendCompensationTable,
    ) -> Self {
        let mut charge = PeriodCharge::default();
        for request in requests
            .iter()
            .filter(|r| r.is_active() && r.period == year)
        {
            match request.request_type {
                RequestType::Free => {
                    charge.free_requested =
                        charge.free_requested.saturating_add(request.requested_days);
                    charge.weekend_days = charge.weekend_days.saturating_add(request.weekend_days);
                }
                RequestType::Block => {
                    charge.block_requested =
                        charge.block_requested.saturating_add(request.requested_days);
                }
            }
        }
        charge.business_days = charge.free_requested.saturating_sub(charge.weekend_days);
        charge.compensation = weekend_compensation(charge.business_days, table);
        charge
    }

    /// Total days charged against the free pool.
    pub fn free_charge(&self) -> u32 {
        self.business_days.saturating_add(self.compensation)
    }
}

/// The result of applying requests to the accrual periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerResult {
    /// Periods holding the remaining balance.
    pub periods: Vec<AccrualPeriod>,
    /// One audit step per period.
    pub audit_steps: Vec<AuditStep>,
}

fn deduct(available: Decimal, charge: u32) -> Decimal {
    (available - Decimal::from(charge)).max(Decimal::ZERO)
}

/// Applies active requests to the periods they draw from.
///
/// Only `Pending` and `Approved` requests count. Requests whose period has
/// no accrual record are ignored here; admission rejects them.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::apply_requests;
/// use vacation_engine::config::WeekendCompensationTable;
/// use vacation_engine::models::{AccrualPeriod, Bucket, RequestStatus, RequestType, VacationRequest};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = AccrualPeriod {
///     year: 2022,
///     period_start: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
///     free_days: Decimal::new(15, 0),
///     block_days: Decimal::new(15, 0),
///     bucket: Bucket::Pending,
/// };
/// let request = VacationRequest {
///     id: "req_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     period: 2022,
///     request_type: RequestType::Block,
///     requested_days: 5,
///     weekend_days: 0,
///     start_date: NaiveDate::from_ymd_opt(2023, 8, 7).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2023, 8, 11).unwrap(),
///     status: RequestStatus::Approved,
/// };
///
/// let result = apply_requests(vec![period], &[request], &WeekendCompensationTable::default(), 1);
/// assert_eq!(result.periods[0].block_days, Decimal::new(10, 0));
/// ```
pub fn apply_requests(
    periods: Vec<AccrualPeriod>,
    requests: &[VacationRequest],
    table: &WeekendCompensationTable,
    first_step_number: u32,
) -> LedgerResult {
    let mut audit_steps = Vec::with_capacity(periods.len());
    let mut step_number = first_step_number;

    let periods = periods
        .into_iter()
        .map(|mut period| {
            let charge = PeriodCharge::for_period(period.year, requests, table);
            let (free_before, block_before) = (period.free_days, period.block_days);

            period.free_days = deduct(period.free_days, charge.free_charge());
            period.block_days = deduct(period.block_days, charge.block_requested);

            debug!(
                year = period.year,
                free_charge = charge.free_charge(),
                block_charge = charge.block_requested,
                "Period charged"
            );

            audit_steps.push(AuditStep {
                step_number,
                rule_id: "balance_ledger".to_string(),
                rule_name: "Balance Ledger".to_string(),
                input: serde_json::json!({
                    "year": period.year,
                    "free_days": free_before.normalize().to_string(),
                    "block_days": block_before.normalize().to_string(),
                    "free_requested": charge.free_requested,
                    "weekend_days": charge.weekend_days,
                    "block_requested": charge.block_requested
                }),
                output: serde_json::json!({
                    "free_days": period.free_days.normalize().to_string(),
                    "block_days": period.block_days.normalize().to_string()
                }),
                reasoning: format!(
                    "{} business day(s) plus {} compensation day(s) charged to free pool; {} day(s) charged to block pool",
                    charge.business_days, charge.compensation, charge.block_requested
                ),
            });
            step_number += 1;

            period
        })
        .collect();

    LedgerResult {
        periods,
        audit_steps,
    }
}
