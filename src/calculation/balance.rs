//! Balance computation pipeline.
//!
//! Runs accrual, classification and the ledger in sequence for one
//! employee. Nothing is cached: every call recomputes from the full request
//! history, so callers that admit requests concurrently must serialize
//! validate-then-persist per employee themselves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::VacationPolicy;
use crate::error::EngineResult;
use crate::models::{AuditTrace, Balance, Employee, VacationRequest};

use super::balance_ledger::apply_requests;
use super::period_accrual::calculate_accrual_periods;
use super::period_classifier::classify_periods;

/// The balance of one employee with the trace that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// The date the balance was computed for.
    pub as_of: NaiveDate,
    /// Remaining days per period, oldest first.
    pub periods: Balance,
    /// Every rule applied along the way.
    pub audit_trace: AuditTrace,
}

/// Computes an employee's remaining balance as of a date.
///
/// Requests belonging to other employees are skipped.
///
/// # Errors
///
/// - `InvalidDateRange` if `as_of` is before the hire date
/// - `CalendarOverflow` on out-of-range date arithmetic
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::compute_balance;
/// use vacation_engine::config::VacationPolicy;
/// use vacation_engine::models::{Bucket, Employee};
/// use chrono::NaiveDate;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     hire_date: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
///     manager_id: None,
/// };
/// let as_of = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let report = compute_balance(&employee, as_of, &[], &VacationPolicy::default()).unwrap();
///
/// assert_eq!(report.periods.periods().len(), 4);
/// assert_eq!(report.periods.get(2024).unwrap().bucket, Bucket::Current);
/// ```
pub fn compute_balance(
    employee: &Employee,
    as_of: NaiveDate,
    requests: &[VacationRequest],
    policy: &VacationPolicy,
) -> EngineResult<BalanceReport> {
    let mut audit_trace = AuditTrace::default();

    let accrual = calculate_accrual_periods(
        employee.hire_date,
        as_of,
        &policy.accrual,
        audit_trace.next_step_number(),
    )?;
    audit_trace.push(accrual.audit_step);

    let classification =
        classify_periods(accrual.periods, as_of, audit_trace.next_step_number())?;
    audit_trace.push(classification.audit_step);

    let own_requests: Vec<VacationRequest> = requests
        .iter()
        .filter(|r| r.employee_id == employee.id)
        .cloned()
        .collect();
    if own_requests.len() != requests.len() {
        debug!(
            employee_id = %employee.id,
            skipped = requests.len() - own_requests.len(),
            "Ignoring requests of other employees"
        );
    }

    let ledger = apply_requests(
        classification.periods,
        &own_requests,
        &policy.compensation,
        audit_trace.next_step_number(),
    );
    for step in ledger.audit_steps {
        audit_trace.push(step);
    }

    Ok(BalanceReport {
        employee_id: employee.id.clone(),
        as_of,
        periods: Balance::new(ledger.periods),
        audit_trace,
    })
}
