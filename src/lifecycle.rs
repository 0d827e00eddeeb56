//! Request lifecycle.
//!
//! A request is created `Pending` by admission and leaves that state exactly
//! once. The owner may cancel a request that has not started yet; an admin
//! or the owner's direct manager (never the owner) approves or rejects it.
//!
//! ```text
//! Pending ──approve──▶ Approved
//!    │    ──reject───▶ Rejected
//!    └────cancel─────▶ Cancelled
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Actor, Employee, RequestStatus, VacationRequest};

/// A lifecycle action on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Approve the request.
    Approve,
    /// Reject the request.
    Reject,
    /// Withdraw the request.
    Cancel,
}

impl Transition {
    /// The status a successful transition lands in.
    pub fn target(self) -> RequestStatus {
        match self {
            Transition::Approve => RequestStatus::Approved,
            Transition::Reject => RequestStatus::Rejected,
            Transition::Cancel => RequestStatus::Cancelled,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Approve => write!(f, "approve"),
            Transition::Reject => write!(f, "reject"),
            Transition::Cancel => write!(f, "cancel"),
        }
    }
}

fn refuse(request: &VacationRequest, to: RequestStatus, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidStateTransition {
        request_id: request.id.clone(),
        from: request.status,
        to,
        reason: reason.into(),
    }
}

/// Applies a transition, returning the updated request.
///
/// `owner` is the employee the request belongs to; it supplies the manager
/// relation for approval rights.
///
/// # Errors
///
/// `InvalidStateTransition` when the request is not pending, the actor lacks
/// the right, or a cancellation comes on or after the start date.
/// `InvalidRequest` when `owner` is not the request's employee.
///
/// # Example
///
/// ```
/// use vacation_engine::lifecycle::{apply_transition, Transition};
/// use vacation_engine::models::{Actor, Employee, RequestStatus, RequestType, VacationRequest};
/// use chrono::NaiveDate;
///
/// let owner = Employee {
///     id: "emp_002".to_string(),
///     hire_date: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
///     manager_id: Some("emp_001".to_string()),
/// };
/// let request = VacationRequest {
///     id: "req_001".to_string(),
///     employee_id: "emp_002".to_string(),
///     period: 2023,
///     request_type: RequestType::Free,
///     requested_days: 3,
///     weekend_days: 0,
///     start_date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 9, 4).unwrap(),
///     status: RequestStatus::Pending,
/// };
/// let manager = Actor { employee_id: "emp_001".to_string(), is_admin: false };
/// let today = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
///
/// let approved = apply_transition(&request, Transition::Approve, &manager, &owner, today).unwrap();
/// assert_eq!(approved.status, RequestStatus::Approved);
/// ```
pub fn apply_transition(
    request: &VacationRequest,
    transition: Transition,
    actor: &Actor,
    owner: &Employee,
    today: NaiveDate,
) -> EngineResult<VacationRequest> {
    if owner.id != request.employee_id {
        return Err(EngineError::InvalidRequest {
            message: format!(
                "request '{}' belongs to '{}', not '{}'",
                request.id, request.employee_id, owner.id
            ),
        });
    }

    let to = transition.target();
    if request.status != RequestStatus::Pending {
        return Err(refuse(request, to, "only pending requests can change status"));
    }

    let is_owner = actor.employee_id == request.employee_id;
    match transition {
        Transition::Cancel => {
            if !is_owner {
                return Err(refuse(request, to, "only the requesting employee can cancel"));
            }
            if request.start_date <= today {
                return Err(refuse(
                    request,
                    to,
                    format!("request starts on {} and can no longer be cancelled", request.start_date),
                ));
            }
        }
        Transition::Approve | Transition::Reject => {
            if is_owner {
                return Err(refuse(request, to, "employees cannot decide their own requests"));
            }
            if !actor.is_admin && !owner.is_managed_by(&actor.employee_id) {
                return Err(refuse(
                    request,
                    to,
                    "only an admin or the employee's direct manager can decide",
                ));
            }
        }
    }

    info!(
        request_id = %request.id,
        actor = %actor.employee_id,
        transition = %transition,
        "Request status changed"
    );

    Ok(VacationRequest {
        status: to,
        ..request.clone()
    })
}

/// Cancels a pending request on behalf of its owner.
pub fn cancel(
    request: &VacationRequest,
    actor: &Actor,
    owner: &Employee,
    today: NaiveDate,
) -> EngineResult<VacationRequest> {
    apply_transition(request, Transition::Cancel, actor, owner, today)
}

/// Approves a pending request.
pub fn approve(
    request: &VacationRequest,
    actor: &Actor,
    owner: &Employee,
    today: NaiveDate,
) -> EngineResult<VacationRequest> {
    apply_transition(request, Transition::Approve, actor, owner, today)
}

/// Rejects a pending request.
pub fn reject(
    request: &VacationRequest,
    actor: &Actor,
    owner: &Employee,
    today: NaiveDate,
) -> EngineResult<VacationRequest> {
    apply_transition(request, Transition::Reject, actor, owner, today)
}
