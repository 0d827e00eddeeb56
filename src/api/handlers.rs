//! HTTP request handlers for the Vacation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{admit_request, compute_balance};
use crate::error::EngineError;
use crate::lifecycle::apply_transition;
use crate::models::subordinates_of;

use super::request::{AdmissionRequest, BalanceRequest, TeamBalanceRequest, TransitionRequest};
use super::response::{ApiError, ApiErrorResponse, TeamBalanceResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/balance", post(balance_handler))
        .route("/requests/admit", post(admit_handler))
        .route("/requests/transition", post(transition_handler))
        .route("/team/balances", post(team_balances_handler))
        .with_state(state)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    if err.is_validation() {
        info!(
            correlation_id = %correlation_id,
            code = err.code(),
            error = %err,
            "Request rejected"
        );
    } else {
        warn!(
            correlation_id = %correlation_id,
            code = err.code(),
            error = %err,
            "Engine fault"
        );
    }
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /balance.
///
/// Returns the employee's remaining balance per period.
async fn balance_handler(
    State(state): State<AppState>,
    payload: Result<Json<BalanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing balance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let as_of = request.as_of.unwrap_or_else(today);
    let start_time = Instant::now();
    match compute_balance(&request.employee, as_of, &request.requests, state.policy()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %report.employee_id,
                periods = report.periods.periods().len(),
                free_days = %report.periods.total_free_days().normalize(),
                block_days = %report.periods.total_block_days().normalize(),
                duration_us = start_time.elapsed().as_micros(),
                "Balance computed"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /requests/admit.
///
/// Validates a candidate request and returns it as a pending request.
async fn admit_handler(
    State(state): State<AppState>,
    payload: Result<Json<AdmissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing admission request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let today = request.today.unwrap_or_else(today);
    match admit_request(
        &request.employee,
        &request.candidate,
        &request.requests,
        today,
        state.policy(),
    ) {
        Ok(admitted) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %admitted.employee_id,
                request_id = %admitted.id,
                "Request admitted"
            );
            json_response(StatusCode::CREATED, admitted)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /requests/transition.
///
/// Applies approve, reject or cancel to a pending request.
async fn transition_handler(
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing transition request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let today = request.today.unwrap_or_else(today);
    match apply_transition(
        &request.request,
        request.action,
        &request.actor,
        &request.owner,
        today,
    ) {
        Ok(updated) => {
            info!(
                correlation_id = %correlation_id,
                request_id = %updated.id,
                status = %updated.status,
                "Transition applied"
            );
            json_response(StatusCode::OK, updated)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /team/balances.
///
/// Computes balances for every direct and indirect report of a manager.
/// Reports hired after `as_of` are listed in `not_started` instead.
async fn team_balances_handler(
    State(state): State<AppState>,
    payload: Result<Json<TeamBalanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing team balance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let as_of = request.as_of.unwrap_or_else(today);
    let start_time = Instant::now();
    let team = subordinates_of(&request.manager_id, &request.employees);

    let mut balances = Vec::with_capacity(team.len());
    let mut not_started = Vec::new();
    for employee in team {
        if employee.hire_date > as_of {
            debug!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                hire_date = %employee.hire_date,
                "Skipping employee hired after as-of date"
            );
            not_started.push(employee.id.clone());
            continue;
        }
        match compute_balance(employee, as_of, &request.requests, state.policy()) {
            Ok(report) => balances.push(report),
            Err(err) => return error_response(correlation_id, err),
        }
    }

    info!(
        correlation_id = %correlation_id,
        manager_id = %request.manager_id,
        team_size = balances.len(),
        not_started = not_started.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Team balances computed"
    );
    json_response(
        StatusCode::OK,
        TeamBalanceResponse {
            manager_id: request.manager_id,
            as_of,
            balances,
            not_started,
        },
    )
}
