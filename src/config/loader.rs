//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the vacation
//! policy from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AdmissionPolicy, PolicyFile, PolicyMetadata, VacationPolicy, WeekendCompensationTable,
};

/// Loads and provides access to the vacation policy.
///
/// # Directory Structure
///
/// ```text
/// config/vacation_policy/
/// ├── policy.yaml        # Metadata, accrual constants, admission cutoff
/// └── compensation.yaml  # Weekend-compensation tiers
/// ```
///
/// `compensation.yaml` is optional; the built-in table applies without it.
///
/// # Example
///
/// ```no_run
/// use vacation_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/vacation_policy").unwrap();
/// println!("Loaded policy: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    policy: VacationPolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if `policy.yaml` is missing
    /// - `ConfigParseError` if any file contains invalid YAML
    /// - `InvalidConfig` if the values are inconsistent
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_file = Self::load_yaml::<PolicyFile>(&path.join("policy.yaml"))?;

        let compensation_path = path.join("compensation.yaml");
        let compensation = if compensation_path.exists() {
            Self::load_yaml::<WeekendCompensationTable>(&compensation_path)?
        } else {
            debug!(path = %compensation_path.display(), "No compensation table, using default");
            WeekendCompensationTable::default()
        };

        Self::from_policy(VacationPolicy {
            metadata: policy_file.policy,
            accrual: policy_file.accrual,
            admission: policy_file.admission,
            compensation,
        })
    }

    /// Wraps an in-memory policy after validating it.
    pub fn from_policy(policy: VacationPolicy) -> EngineResult<Self> {
        validate_policy(&policy)?;
        Ok(Self { policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the full policy.
    pub fn policy(&self) -> &VacationPolicy {
        &self.policy
    }

    /// Returns the policy metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.policy.metadata
    }

    /// Returns the admission settings.
    pub fn admission(&self) -> AdmissionPolicy {
        self.policy.admission
    }
}

fn validate_policy(policy: &VacationPolicy) -> EngineResult<()> {
    let invalid = |message: String| Err(EngineError::InvalidConfig { message });

    let cutoff = policy.admission.monthly_cutoff_day;
    if !(1..=31).contains(&cutoff) {
        return invalid(format!("monthly_cutoff_day must be 1..=31, got {}", cutoff));
    }

    let accrual = &policy.accrual;
    if accrual.annual_days <= Decimal::ZERO {
        return invalid(format!("annual_days must be positive, got {}", accrual.annual_days));
    }
    if accrual.block_days_cap < Decimal::ZERO || accrual.block_days_cap > accrual.annual_days {
        return invalid(format!(
            "block_days_cap must be between 0 and annual_days ({}), got {}",
            accrual.annual_days, accrual.block_days_cap
        ));
    }

    let tiers = &policy.compensation.tiers;
    match tiers.first() {
        Some(first) if first.min_business_days == 0 => {}
        _ => return invalid("compensation table must start at 0 business days".to_string()),
    }
    if tiers
        .windows(2)
        .any(|w| w[0].min_business_days >= w[1].min_business_days)
    {
        return invalid("compensation tiers must be strictly ascending".to_string());
    }

    Ok(())
}
