//! HTTP API module for the Vacation Engine.
//!
//! This module provides the REST API endpoints for computing balances,
//! admitting new requests, and applying lifecycle transitions.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AdmissionRequest, BalanceRequest, TeamBalanceRequest, TransitionRequest};
pub use response::{ApiError, ApiErrorResponse, TeamBalanceResponse};
pub use state::AppState;
