//! Configuration loading and management for the Vacation Engine.
//!
//! This module loads the vacation policy (accrual constants, monthly
//! cutoff day and weekend-compensation tiers) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use vacation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/vacation_policy").unwrap();
//! println!("Cutoff day: {}", config.admission().monthly_cutoff_day);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AccrualPolicy, AdmissionPolicy, CompensationTier, DEFAULT_MONTHLY_CUTOFF_DAY, PolicyFile,
    PolicyMetadata, VacationPolicy, WeekendCompensationTable,
};
