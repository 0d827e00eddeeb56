//! Period accrual calculation.
//!
//! This module generates one [`AccrualPeriod`] per anniversary year between
//! the hire date and an as-of date. Completed years earn the full annual
//! entitlement; the open year earns a share proportional to the days
//! elapsed since its anniversary.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AccrualPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AccrualPeriod, AuditStep, Bucket};

use super::day_detection::days_in_year;

/// Days earned by a completed anniversary year under the standard policy.
pub const ANNUAL_ENTITLEMENT_DAYS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Block pool cap per period under the standard policy.
pub const BLOCK_DAYS_CAP: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// The result of generating accrual periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualResult {
    /// One period per anniversary year, oldest first. Buckets are
    /// provisional until [`super::classify_periods`] runs.
    pub periods: Vec<AccrualPeriod>,
    /// The audit step recording the accrual.
    pub audit_step: AuditStep,
}

/// Returns the hire date advanced by `years` whole years.
///
/// A Feb 29 hire date lands on Feb 28 in common years.
pub fn anniversary(hire_date: NaiveDate, years: u32) -> EngineResult<NaiveDate> {
    years
        .checked_mul(12)
        .and_then(|months| hire_date.checked_add_months(Months::new(months)))
        .ok_or_else(|| {
            EngineError::overflow(format!("{} advanced by {} years", hire_date, years))
        })
}

/// Splits an entitlement into `(free_days, block_days)`.
///
/// The block pool fills first, up to `block_cap`; the remainder is free.
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::{split_entitlement, BLOCK_DAYS_CAP};
/// use rust_decimal::Decimal;
///
/// let (free, block) = split_entitlement(Decimal::new(20, 0), BLOCK_DAYS_CAP);
/// assert_eq!(free, Decimal::new(5, 0));
/// assert_eq!(block, Decimal::new(15, 0));
/// ```
pub fn split_entitlement(entitlement: Decimal, block_cap: Decimal) -> (Decimal, Decimal) {
    if entitlement >= block_cap {
        (entitlement - block_cap, block_cap)
    } else {
        (Decimal::ZERO, entitlement)
    }
}

/// Calculates the accrual periods from hire date to `as_of`.
///
/// For each anniversary `start` with `start <= as_of`:
/// - if `start + 1 year <= as_of` the period is complete and earns
///   `annual_days`
/// - otherwise it is open and earns
///   `days_elapsed * annual_days / days_in_year(start.year)`
///
/// Entitlements are never rounded.
///
/// # Errors
///
/// - `InvalidDateRange` if `as_of` is before `hire_date`
/// - `CalendarOverflow` if anniversary arithmetic leaves the date range
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::calculate_accrual_periods;
/// use vacation_engine::config::AccrualPolicy;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let hire = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2023, 7, 2).unwrap();
/// let result = calculate_accrual_periods(hire, as_of, &AccrualPolicy::default(), 1).unwrap();
///
/// assert_eq!(result.periods.len(), 1);
/// assert_eq!(result.periods[0].block_days.round_dp(2), Decimal::new(1496, 2));
/// assert_eq!(result.periods[0].free_days, Decimal::ZERO);
/// ```
pub fn calculate_accrual_periods(
    hire_date: NaiveDate,
    as_of: NaiveDate,
    policy: &AccrualPolicy,
    step_number: u32,
) -> EngineResult<AccrualResult> {
    if as_of < hire_date {
        return Err(EngineError::InvalidDateRange {
            start: hire_date,
            end: as_of,
        });
    }

    let mut periods = Vec::new();
    let mut years: u32 = 0;
    let mut open_entitlement = Decimal::ZERO;

    loop {
        let start = anniversary(hire_date, years)?;
        if start > as_of {
            break;
        }
        let next = anniversary(hire_date, years + 1)?;

        let entitlement = if next > as_of {
            let elapsed = (as_of - start).num_days();
            let entitlement = Decimal::from(elapsed) * policy.annual_days
                / Decimal::from(days_in_year(start.year()));
            open_entitlement = entitlement;
            entitlement
        } else {
            policy.annual_days
        };

        let (free_days, block_days) = split_entitlement(entitlement, policy.block_days_cap);
        periods.push(AccrualPeriod {
            year: start.year(),
            period_start: start,
            free_days,
            block_days,
            bucket: Bucket::Current,
        });

        years += 1;
    }

    debug!(
        hire_date = %hire_date,
        as_of = %as_of,
        periods = periods.len(),
        "Accrual periods generated"
    );

    let total: Decimal = periods.iter().map(AccrualPeriod::total_days).sum();
    let audit_step = AuditStep {
        step_number,
        rule_id: "period_accrual".to_string(),
        rule_name: "Period Accrual".to_string(),
        input: serde_json::json!({
            "hire_date": hire_date.to_string(),
            "as_of": as_of.to_string(),
            "annual_days": policy.annual_days.normalize().to_string(),
            "block_days_cap": policy.block_days_cap.normalize().to_string()
        }),
        output: serde_json::json!({
            "periods": periods.len(),
            "total_days": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} completed period(s) at {} days; open period prorated to {} days",
            periods.len().saturating_sub(1),
            policy.annual_days.normalize(),
            open_entitlement.round_dp(4).normalize()
        ),
    };

    Ok(AccrualResult {
        periods,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn accrue(hire: &str, as_of: &str) -> Vec<AccrualPeriod> {
        calculate_accrual_periods(make_date(hire), make_date(as_of), &AccrualPolicy::default(), 1)
            .unwrap()
            .periods
    }

    #[test]
    fn test_prorated_first_year_below_block_cap() {
        let periods = accrue("2023-01-01", "2023-07-02");
        assert_eq!(periods.len(), 1);
        // 182 days * 30 / 365
        assert_eq!(periods[0].block_days.round_dp(2), dec("14.96"));
        assert_eq!(periods[0].free_days, Decimal::ZERO);
        assert_eq!(periods[0].year, 2023);
    }

    #[test]
    fn test_prorated_first_year_above_block_cap() {
        // 2023-10-01 is 273 days after 2023-01-01: 273 * 30 / 365 = 22.438...
        let periods = accrue("2023-01-01", "2023-10-01");
        assert_eq!(periods[0].block_days, dec("15"));
        assert_eq!(periods[0].free_days.round_dp(3), dec("7.438"));
    }

    #[test]
    fn test_leap_year_uses_366_days() {
        // 183 days into 2024: 183 * 30 / 366 = 15 exactly
        let periods = accrue("2024-01-01", "2024-07-02");
        assert_eq!(periods[0].total_days(), dec("15"));
        assert_eq!(periods[0].block_days, dec("15"));
        assert_eq!(periods[0].free_days, Decimal::ZERO);
    }

    #[test]
    fn test_completed_periods_earn_full_entitlement() {
        let periods = accrue("2021-06-01", "2024-06-15");
        assert_eq!(periods.len(), 4);
        for period in &periods[..3] {
            assert_eq!(period.block_days, dec("15"), "year {}", period.year);
            assert_eq!(period.free_days, dec("15"), "year {}", period.year);
        }
        let years: Vec<i32> = periods.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2021, 2022, 2023, 2024]);
    }

    #[test]
    fn test_open_period_starting_today_earns_nothing() {
        let periods = accrue("2022-03-10", "2024-03-10");
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[2].total_days(), Decimal::ZERO);
        assert_eq!(periods[1].total_days(), dec("30"));
    }

    #[test]
    fn test_hire_date_equals_as_of() {
        let periods = accrue("2024-05-20", "2024-05-20");
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].total_days(), Decimal::ZERO);
    }

    #[test]
    fn test_hire_after_as_of_is_invalid_date_range() {
        let result = calculate_accrual_periods(
            make_date("2024-05-20"),
            make_date("2024-05-19"),
            &AccrualPolicy::default(),
            1,
        );
        assert!(matches!(result, Err(EngineError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_feb_29_hire_does_not_drift() {
        let periods = accrue("2020-02-29", "2025-03-01");
        let starts: Vec<NaiveDate> = periods.iter().map(|p| p.period_start).collect();
        assert_eq!(
            starts,
            vec![
                make_date("2020-02-29"),
                make_date("2021-02-28"),
                make_date("2022-02-28"),
                make_date("2023-02-28"),
                make_date("2024-02-29"),
                make_date("2025-02-28"),
            ]
        );
    }

    #[test]
    fn test_custom_policy_constants() {
        let policy = AccrualPolicy {
            annual_days: dec("20"),
            block_days_cap: dec("10"),
        };
        let result =
            calculate_accrual_periods(make_date("2020-01-01"), make_date("2021-06-01"), &policy, 1)
                .unwrap();
        assert_eq!(result.periods[0].free_days, dec("10"));
        assert_eq!(result.periods[0].block_days, dec("10"));
    }

    #[test]
    fn test_audit_step_records_inputs() {
        let result = calculate_accrual_periods(
            make_date("2021-06-01"),
            make_date("2024-06-15"),
            &AccrualPolicy::default(),
            7,
        )
        .unwrap();
        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "period_accrual");
        assert_eq!(result.audit_step.input["hire_date"], "2021-06-01");
        assert_eq!(result.audit_step.output["periods"], 4);
    }

    #[test]
    fn test_split_entitlement_boundary() {
        assert_eq!(split_entitlement(dec("15"), BLOCK_DAYS_CAP), (dec("0"), dec("15")));
        assert_eq!(split_entitlement(dec("14.99"), BLOCK_DAYS_CAP), (dec("0"), dec("14.99")));
    }

    proptest! {
        #[test]
        fn prop_split_preserves_total_and_caps_block(
            hire_offset in 0i64..5000,
            elapsed in 0i64..4000,
        ) {
            let hire = make_date("2010-01-01") + chrono::Duration::days(hire_offset);
            let as_of = hire + chrono::Duration::days(elapsed);
            let result =
                calculate_accrual_periods(hire, as_of, &AccrualPolicy::default(), 1).unwrap();
            for period in &result.periods {
                prop_assert!(period.block_days <= BLOCK_DAYS_CAP);
                prop_assert!(period.free_days >= Decimal::ZERO);
                prop_assert!(period.block_days >= Decimal::ZERO);
                prop_assert!(period.total_days() <= ANNUAL_ENTITLEMENT_DAYS);
            }
            let (last, completed) = result.periods.split_last().unwrap();
            for period in completed {
                prop_assert_eq!(period.total_days(), ANNUAL_ENTITLEMENT_DAYS);
            }
            prop_assert!(last.total_days() <= ANNUAL_ENTITLEMENT_DAYS);
        }
    }
}
