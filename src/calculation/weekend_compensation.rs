//! Weekend compensation rule.
//!
//! Free-day requests are charged by business day, but a long free-day
//! allotment still spans weekends. The compensation table adds extra days to
//! the charge once the business days requested in a period reach its
//! thresholds.
//!
//! | business days | extra days |
//! |---------------|------------|
//! | 0–4           | 0          |
//! | 5–9           | 2          |
//! | 10–11         | 4          |
//! | 12+           | 4          |

use crate::config::WeekendCompensationTable;

/// Returns the extra free days charged for `business_days`.
///
/// Uses the last tier whose `min_business_days` is reached; an empty table
/// charges nothing.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::weekend_compensation;
/// use vacation_engine::config::WeekendCompensationTable;
///
/// let table = WeekendCompensationTable::default();
/// assert_eq!(weekend_compensation(4, &table), 0);
/// assert_eq!(weekend_compensation(5, &table), 2);
/// assert_eq!(weekend_compensation(10, &table), 4);
/// ```
pub fn weekend_compensation(business_days: u32, table: &WeekendCompensationTable) -> u32 {
    table
        .tiers
        .iter()
        .rev()
        .find(|tier| business_days >= tier.min_business_days)
        .map_or(0, |tier| tier.extra_days)
}
