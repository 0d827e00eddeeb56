//! Request types for the Vacation Engine API.
//!
//! Every endpoint receives the data it needs in the body; the engine keeps
//! no storage of its own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::CandidateRequest;
use crate::lifecycle::Transition;
use crate::models::{Actor, Employee, VacationRequest};

/// Request body for `POST /balance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRequest {
    /// The employee to compute the balance for.
    pub employee: Employee,
    /// The date to compute the balance for; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// The employee's request history.
    #[serde(default)]
    pub requests: Vec<VacationRequest>,
}

/// Request body for `POST /requests/admit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionRequest {
    /// The employee submitting the request.
    pub employee: Employee,
    /// The evaluation date; defaults to today.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// The request to admit.
    pub candidate: CandidateRequest,
    /// The employee's request history.
    #[serde(default)]
    pub requests: Vec<VacationRequest>,
}

/// Request body for `POST /requests/transition`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// The request to transition.
    pub request: VacationRequest,
    /// The employee owning the request.
    pub owner: Employee,
    /// The identity performing the transition.
    pub actor: Actor,
    /// The transition to apply.
    pub action: Transition,
    /// The evaluation date; defaults to today.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for `POST /team/balances`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamBalanceRequest {
    /// The manager whose reports to include.
    pub manager_id: String,
    /// The organisation's employees.
    pub employees: Vec<Employee>,
    /// Request history of those employees.
    #[serde(default)]
    pub requests: Vec<VacationRequest>,
    /// The date to compute balances for; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}
