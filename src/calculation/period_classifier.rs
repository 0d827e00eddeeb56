//! Period classification.
//!
//! Labels each accrual period by the age of its anniversary relative to the
//! as-of date. Buckets are for reporting; deductions always follow the
//! request's own period.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AccrualPeriod, AuditStep, Bucket};

/// The result of classifying accrual periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The periods with their buckets assigned.
    pub periods: Vec<AccrualPeriod>,
    /// The audit step recording the classification.
    pub audit_step: AuditStep,
}

fn years_before(date: NaiveDate, years: u32) -> EngineResult<NaiveDate> {
    date.checked_sub_months(Months::new(years * 12))
        .ok_or_else(|| EngineError::overflow(format!("{} minus {} years", date, years)))
}

/// Classifies a single anniversary date.
///
/// - on or before `as_of - 2 years`: [`Bucket::Expired`]
/// - on or before `as_of - 1 year`: [`Bucket::Pending`]
/// - otherwise: [`Bucket::Current`]
///
/// # Example
///
/// ```
/// use vacation_engine::calculation::classify_anniversary;
/// use vacation_engine::models::Bucket;
/// use chrono::NaiveDate;
///
/// let as_of = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// assert_eq!(classify_anniversary(d(2022, 6, 15), as_of).unwrap(), Bucket::Expired);
/// assert_eq!(classify_anniversary(d(2022, 6, 16), as_of).unwrap(), Bucket::Pending);
/// assert_eq!(classify_anniversary(d(2024, 6, 1), as_of).unwrap(), Bucket::Current);
/// ```
pub fn classify_anniversary(anniversary: NaiveDate, as_of: NaiveDate) -> EngineResult<Bucket> {
    let two_years_ago = years_before(as_of, 2)?;
    let one_year_ago = years_before(as_of, 1)?;

    Ok(if anniversary <= two_years_ago {
        Bucket::Expired
    } else if anniversary <= one_year_ago {
        Bucket::Pending
    } else {
        Bucket::Current
    })
}

/// Assigns a bucket to every period.
pub fn classify_periods(
    mut periods: Vec<AccrualPeriod>,
    as_of: NaiveDate,
    step_number: u32,
) -> EngineResult<ClassificationResult> {
    for period in periods.iter_mut() {
        period.bucket = classify_anniversary(period.period_start, as_of)?;
    }

    let count = |bucket: Bucket| periods.iter().filter(|p| p.bucket == bucket).count();
    let (expired, pending, current) = (
        count(Bucket::Expired),
        count(Bucket::Pending),
        count(Bucket::Current),
    );

    let labels: serde_json::Map<String, serde_json::Value> = periods
        .iter()
        .map(|p| (p.year.to_string(), serde_json::json!(p.bucket.to_string())))
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "period_classification".to_string(),
        rule_name: "Period Classification".to_string(),
        input: serde_json::json!({
            "as_of": as_of.to_string(),
            "periods": periods.len()
        }),
        output: serde_json::Value::Object(labels),
        reasoning: format!(
            "{} expired, {} pending, {} current relative to {}",
            expired, pending, current, as_of
        ),
    };

    Ok(ClassificationResult {
        periods,
        audit_step,
    })
}
