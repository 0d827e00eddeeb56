//! Vacation Entitlement & Balance Engine
//!
//! This crate computes yearly vacation entitlement accrued from an
//! employee's hire date, splits it into free and block pools, deducts
//! pending and approved requests per anniversary period, and decides
//! whether a new request may be admitted.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
