//! Core data models for the Vacation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod accrual_period;
mod audit;
mod employee;
mod vacation_request;

pub use accrual_period::{AccrualPeriod, Balance, Bucket};
pub use audit::{AuditStep, AuditTrace};
pub use employee::{Actor, Employee, subordinates_of};
pub use vacation_request::{RequestStatus, RequestType, VacationRequest};
