//! Configuration types for the vacation policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every type has a
//! `Default` matching the built-in policy, so callers without a policy
//! directory still get the standard rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metadata about the policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyMetadata {
    /// Short identifier of the policy (e.g., "standard").
    pub code: String,
    /// The human-readable name of the policy.
    pub name: String,
    /// The version or effective date of the policy.
    pub version: String,
}

impl Default for PolicyMetadata {
    fn default() -> Self {
        Self {
            code: "standard".to_string(),
            name: "Standard Vacation Policy".to_string(),
            version: "builtin".to_string(),
        }
    }
}

/// Entitlement constants used by the accrual calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualPolicy {
    /// Days earned by a fully completed anniversary year.
    pub annual_days: Decimal,
    /// Upper bound of the block pool per period.
    pub block_days_cap: Decimal,
}

impl Default for AccrualPolicy {
    fn default() -> Self {
        Self {
            annual_days: Decimal::new(30, 0),
            block_days_cap: Decimal::new(15, 0),
        }
    }
}

/// Settings for request admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionPolicy {
    /// Last day of the month on which requests starting that same month
    /// are still accepted.
    pub monthly_cutoff_day: u32,
}

/// Default monthly cutoff day when none is configured.
pub const DEFAULT_MONTHLY_CUTOFF_DAY: u32 = 15;

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            monthly_cutoff_day: DEFAULT_MONTHLY_CUTOFF_DAY,
        }
    }
}

/// One row of the weekend-compensation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationTier {
    /// Smallest business-day total this row applies to.
    pub min_business_days: u32,
    /// Extra days charged against the free pool.
    pub extra_days: u32,
}

/// Tiers mapping requested business days to extra free days charged.
///
/// Rows are ordered by `min_business_days`; a total falls into the last
/// row whose threshold it reaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekendCompensationTable {
    /// The table rows, ascending.
    pub tiers: Vec<CompensationTier>,
}

impl Default for WeekendCompensationTable {
    fn default() -> Self {
        let tier = |min_business_days, extra_days| CompensationTier {
            min_business_days,
            extra_days,
        };
        Self {
            tiers: vec![tier(0, 0), tier(5, 2), tier(10, 4), tier(12, 4)],
        }
    }
}

/// Contents of `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Policy metadata.
    pub policy: PolicyMetadata,
    /// Accrual constants.
    #[serde(default)]
    pub accrual: AccrualPolicy,
    /// Admission settings.
    #[serde(default)]
    pub admission: AdmissionPolicy,
}

/// The complete vacation policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VacationPolicy {
    /// Policy metadata.
    pub metadata: PolicyMetadata,
    /// Accrual constants.
    pub accrual: AccrualPolicy,
    /// Admission settings.
    pub admission: AdmissionPolicy,
    /// Weekend-compensation tiers.
    pub compensation: WeekendCompensationTable,
}
