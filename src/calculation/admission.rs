//! Request admission.
//!
//! Decides whether a new vacation request may be created. Checks run in a
//! fixed order and the first failure is returned, so a caller always sees
//! the same reason for the same input.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{AdmissionPolicy, VacationPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{Balance, Employee, RequestStatus, RequestType, VacationRequest};

use super::balance::compute_balance;
use super::day_detection::{count_weekend_days, is_weekend_only};

/// A request submitted for admission.
///
/// `request_type` is kept as submitted so an unknown type is reported at
/// its place in the check order rather than at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRequest {
    /// The employee submitting the request.
    pub employee_id: String,
    /// The pool to draw from, as submitted ("free" or "block").
    #[serde(rename = "type")]
    pub request_type: String,
    /// Calendar days requested, weekends included.
    pub requested_days: i64,
    /// First day of the vacation (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the vacation (inclusive).
    pub end_date: NaiveDate,
    /// The accrual period to draw from.
    pub period: i32,
}

/// Validates a candidate against the balance and existing requests.
///
/// Checks, first failure wins:
/// 1. `requested_days > 0` (`InvalidRequest`)
/// 2. `start_date <= end_date` (`InvalidDateRange`), and `requested_days`
///    equals the calendar days in the range (`InvalidRequest`)
/// 3. `start_date >= today` (`PastDateNotAllowed`)
/// 4. known request type (`InvalidType`)
/// 5. monthly cutoff for requests starting this month (`MonthlyCutoffExceeded`)
/// 6. no active request shares a day (`OverlappingRequest`)
/// 7. the range holds a business day (`WeekendOnlyNotAllowed`)
/// 8. the period exists and its pool covers the days (`PeriodNotFound`,
///    `InsufficientFreeBalance`, `InsufficientBlockBalance`)
/// 9. weekend days do not account for every requested day
///    (`WeekendOnlyNotAllowed`)
///
/// On success returns a new `Pending` request with `weekend_days` filled in.
pub fn validate_request(
    candidate: &CandidateRequest,
    balance: &Balance,
    existing: &[VacationRequest],
    today: NaiveDate,
    policy: AdmissionPolicy,
) -> EngineResult<VacationRequest> {
    if candidate.requested_days <= 0 {
        return Err(EngineError::InvalidRequest {
            message: format!(
                "requested_days must be positive, got {}",
                candidate.requested_days
            ),
        });
    }
    let requested_days =
        u32::try_from(candidate.requested_days).map_err(|_| EngineError::InvalidRequest {
            message: format!("requested_days too large: {}", candidate.requested_days),
        })?;

    let (start_date, end_date) = (candidate.start_date, candidate.end_date);
    if start_date > end_date {
        return Err(EngineError::InvalidDateRange {
            start: start_date,
            end: end_date,
        });
    }

    let span_days = (end_date - start_date).num_days() + 1;
    if candidate.requested_days != span_days {
        return Err(EngineError::InvalidRequest {
            message: format!(
                "requested_days {} does not match the {} calendar day(s) from {} to {}",
                candidate.requested_days, span_days, start_date, end_date
            ),
        });
    }

    if start_date < today {
        return Err(EngineError::PastDateNotAllowed { start_date, today });
    }

    let request_type: RequestType = candidate.request_type.parse()?;

    let starts_this_month = start_date.year() == today.year() && start_date.month() == today.month();
    if starts_this_month && today.day() > policy.monthly_cutoff_day {
        return Err(EngineError::MonthlyCutoffExceeded {
            cutoff_day: policy.monthly_cutoff_day,
            today_day: today.day(),
        });
    }

    if let Some(conflict) = existing
        .iter()
        .find(|r| r.is_active() && r.overlaps(start_date, end_date))
    {
        return Err(EngineError::OverlappingRequest {
            existing_id: conflict.id.clone(),
            existing_start: conflict.start_date,
            existing_end: conflict.end_date,
        });
    }

    if is_weekend_only(start_date, end_date) {
        return Err(EngineError::WeekendOnlyNotAllowed {
            start_date,
            end_date,
        });
    }

    let period = balance
        .get(candidate.period)
        .ok_or(EngineError::PeriodNotFound {
            period: candidate.period,
        })?;
    let requested = Decimal::from(requested_days);
    match request_type {
        RequestType::Free if requested > period.free_days => {
            return Err(EngineError::InsufficientFreeBalance {
                period: period.year,
                requested: requested_days,
                available: period.free_days.normalize().to_string(),
            });
        }
        RequestType::Block if requested > period.block_days => {
            return Err(EngineError::InsufficientBlockBalance {
                period: period.year,
                requested: requested_days,
                available: period.block_days.normalize().to_string(),
            });
        }
        _ => {}
    }

    let weekend_days = count_weekend_days(start_date, end_date);
    if weekend_days == requested_days {
        return Err(EngineError::WeekendOnlyNotAllowed {
            start_date,
            end_date,
        });
    }

    debug!(
        employee_id = %candidate.employee_id,
        period = candidate.period,
        request_type = %request_type,
        requested_days,
        weekend_days,
        "Request admitted"
    );

    Ok(VacationRequest {
        id: Uuid::new_v4().to_string(),
        employee_id: candidate.employee_id.clone(),
        period: candidate.period,
        request_type,
        requested_days,
        weekend_days,
        start_date,
        end_date,
        status: RequestStatus::Pending,
    })
}

/// Computes the employee's balance as of `today` and validates the candidate.
///
/// `existing` is the employee's full request history; inactive requests are
/// ignored by both the balance and the overlap check.
pub fn admit_request(
    employee: &Employee,
    candidate: &CandidateRequest,
    existing: &[VacationRequest],
    today: NaiveDate,
    policy: &VacationPolicy,
) -> EngineResult<VacationRequest> {
    if candidate.employee_id != employee.id {
        return Err(EngineError::InvalidRequest {
            message: format!(
                "candidate belongs to '{}', not '{}'",
                candidate.employee_id, employee.id
            ),
        });
    }

    let own: Vec<VacationRequest> = existing
        .iter()
        .filter(|r| r.employee_id == employee.id)
        .cloned()
        .collect();
    let report = compute_balance(employee, today, &own, policy)?;
    let admitted = validate_request(candidate, &report.periods, &own, today, policy.admission)?;

    info!(
        employee_id = %employee.id,
        request_id = %admitted.id,
        period = admitted.period,
        "Vacation request admitted"
    );
    Ok(admitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccrualPeriod, Bucket};
    use std::str::FromStr;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // 2025-03-03 is a Monday
    fn today() -> NaiveDate {
        make_date("2025-03-03")
    }

    fn balance() -> Balance {
        Balance::new(vec![
            AccrualPeriod {
                year: 2023,
                period_start: make_date("2023-06-01"),
                free_days: dec("15"),
                block_days: dec("15"),
                bucket: Bucket::Pending,
            },
            AccrualPeriod {
                year: 2024,
                period_start: make_date("2024-06-01"),
                free_days: dec("0"),
                block_days: dec("11.5"),
                bucket: Bucket::Current,
            },
        ])
    }

    fn candidate(request_type: &str, days: i64, start: &str, end: &str) -> CandidateRequest {
        CandidateRequest {
            employee_id: "emp_001".to_string(),
            request_type: request_type.to_string(),
            requested_days: days,
            start_date: make_date(start),
            end_date: make_date(end),
            period: 2023,
        }
    }

    fn existing(start: &str, end: &str, status: RequestStatus) -> VacationRequest {
        VacationRequest {
            id: "req_existing".to_string(),
            employee_id: "emp_001".to_string(),
            period: 2023,
            request_type: RequestType::Free,
            requested_days: 3,
            weekend_days: 0,
            start_date: make_date(start),
            end_date: make_date(end),
            status,
        }
    }

    fn validate(candidate: &CandidateRequest, existing: &[VacationRequest]) -> EngineResult<VacationRequest> {
        validate_request(candidate, &balance(), existing, today(), AdmissionPolicy::default())
    }

    #[test]
    fn test_valid_free_request_admitted() {
        // Mon 2025-04-07 to Fri 2025-04-11
        let admitted = validate(&candidate("free", 5, "2025-04-07", "2025-04-11"), &[]).unwrap();
        assert_eq!(admitted.status, RequestStatus::Pending);
        assert_eq!(admitted.weekend_days, 0);
        assert_eq!(admitted.request_type, RequestType::Free);
        assert_eq!(admitted.requested_days, 5);
        assert!(Uuid::parse_str(&admitted.id).is_ok());
    }

    #[test]
    fn test_weekend_days_computed() {
        // Mon 2025-04-07 to Sun 2025-04-13
        let admitted = validate(&candidate("block", 7, "2025-04-07", "2025-04-13"), &[]).unwrap();
        assert_eq!(admitted.weekend_days, 2);
    }

    #[test]
    fn test_zero_days_is_invalid_request() {
        let result = validate(&candidate("free", 0, "2025-04-07", "2025-04-11"), &[]);
        assert!(matches!(result, Err(EngineError::InvalidRequest { .. })));
    }

    #[test]
    fn test_invalid_request_checked_before_dates() {
        // Both the day count and the date range are wrong; the count wins
        let result = validate(&candidate("free", -1, "2025-04-11", "2025-04-07"), &[]);
        assert!(matches!(result, Err(EngineError::InvalidRequest { .. })));
    }

    #[test]
    fn test_inverted_range_is_invalid_date_range() {
        let result = validate(&candidate("free", 3, "2025-04-11", "2025-04-07"), &[]);
        assert!(matches!(result, Err(EngineError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_past_start_rejected() {
        let result = validate(&candidate("free", 4, "2025-03-02", "2025-03-05"), &[]);
        assert!(matches!(result, Err(EngineError::PastDateNotAllowed { .. })));
    }

    #[test]
    fn test_start_today_allowed() {
        let result = validate(&candidate("free", 3, "2025-03-03", "2025-03-05"), &[]);
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn test_unknown_type_rejected_after_date_checks() {
        let result = validate(&candidate("sick", 3, "2025-04-07", "2025-04-09"), &[]);
        assert!(matches!(result, Err(EngineError::InvalidType { .. })));

        let result = validate(&candidate("sick", 2, "2025-03-01", "2025-03-02"), &[]);
        assert!(matches!(result, Err(EngineError::PastDateNotAllowed { .. })));
    }

    #[test]
    fn test_monthly_cutoff_exceeded() {
        let today = make_date("2025-03-17");
        let result = validate_request(
            &candidate("free", 3, "2025-03-24", "2025-03-26"),
            &balance(),
            &[],
            today,
            AdmissionPolicy::default(),
        );
        match result {
            Err(EngineError::MonthlyCutoffExceeded {
                cutoff_day,
                today_day,
            }) => {
                assert_eq!(cutoff_day, 15);
                assert_eq!(today_day, 17);
            }
            other => panic!("Expected MonthlyCutoffExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_cutoff_day_itself_still_open() {
        let today = make_date("2025-03-14");
        let result = validate_request(
            &candidate("free", 3, "2025-03-24", "2025-03-26"),
            &balance(),
            &[],
            today,
            AdmissionPolicy {
                monthly_cutoff_day: 14,
            },
        );
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn test_cutoff_ignores_next_month() {
        let today = make_date("2025-03-20");
        let result = validate_request(
            &candidate("free", 3, "2025-04-07", "2025-04-09"),
            &balance(),
            &[],
            today,
            AdmissionPolicy::default(),
        );
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn test_shared_boundary_day_overlaps() {
        let existing = [existing("2025-03-01", "2025-03-10", RequestStatus::Approved)];
        let result = validate(&candidate("free", 4, "2025-03-10", "2025-03-13"), &existing);
        match result {
            Err(EngineError::OverlappingRequest { existing_id, .. }) => {
                assert_eq!(existing_id, "req_existing");
            }
            other => panic!("Expected OverlappingRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_adjacent_range_does_not_overlap() {
        let existing = [existing("2025-03-01", "2025-03-10", RequestStatus::Pending)];
        let result = validate(&candidate("free", 3, "2025-03-11", "2025-03-13"), &existing);
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn test_cancelled_request_does_not_block_dates() {
        let existing = [
            existing("2025-04-07", "2025-04-11", RequestStatus::Cancelled),
            existing("2025-04-07", "2025-04-11", RequestStatus::Rejected),
        ];
        let result = validate(&candidate("free", 5, "2025-04-07", "2025-04-11"), &existing);
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn test_weekend_only_range_rejected() {
        // Sat 2025-04-05, Sun 2025-04-06
        let result = validate(&candidate("free", 2, "2025-04-05", "2025-04-06"), &[]);
        assert!(matches!(result, Err(EngineError::WeekendOnlyNotAllowed { .. })));
    }

    #[test]
    fn test_weekend_only_checked_before_balance() {
        let mut weekend = candidate("block", 2, "2025-04-05", "2025-04-06");
        weekend.period = 1999;
        let result = validate(&weekend, &[]);
        assert!(matches!(result, Err(EngineError::WeekendOnlyNotAllowed { .. })));
    }

    #[test]
    fn test_missing_period_rejected() {
        let mut request = candidate("free", 3, "2025-04-07", "2025-04-09");
        request.period = 2019;
        let result = validate(&request, &[]);
        assert_eq!(result, Err(EngineError::PeriodNotFound { period: 2019 }));
    }

    #[test]
    fn test_insufficient_free_balance() {
        let result = validate(&candidate("free", 16, "2025-04-07", "2025-04-22"), &[]);
        match result {
            Err(EngineError::InsufficientFreeBalance {
                period,
                requested,
                available,
            }) => {
                assert_eq!(period, 2023);
                assert_eq!(requested, 16);
                assert_eq!(available, "15");
            }
            other => panic!("Expected InsufficientFreeBalance, got {:?}", other),
        }
    }

    #[test]
    fn test_fractional_block_balance_truncates_on_use() {
        let mut request = candidate("block", 12, "2025-04-07", "2025-04-18");
        request.period = 2024;
        let result = validate(&request, &[]);
        assert!(matches!(
            result,
            Err(EngineError::InsufficientBlockBalance { .. })
        ));

        request.requested_days = 11;
        request.end_date = make_date("2025-04-17");
        assert!(validate(&request, &[]).is_ok());
    }

    #[test]
    fn test_empty_free_pool_rejects_free_request() {
        let mut request = candidate("free", 1, "2025-04-07", "2025-04-07");
        request.period = 2024;
        assert!(matches!(
            validate(&request, &[]),
            Err(EngineError::InsufficientFreeBalance { .. })
        ));
    }

    #[test]
    fn test_requested_days_must_match_range_length() {
        // Fri 2025-04-04 to Mon 2025-04-07 spans 4 days, 2 of them weekend
        let result = validate(&candidate("free", 1, "2025-04-04", "2025-04-07"), &[]);
        match result {
            Err(EngineError::InvalidRequest { message }) => {
                assert!(message.contains("4 calendar day(s)"), "{}", message);
            }
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }

        let result = validate(&candidate("free", 2, "2025-04-04", "2025-04-06"), &[]);
        assert!(matches!(result, Err(EngineError::InvalidRequest { .. })));

        let result = validate(&candidate("free", 5, "2025-04-07", "2025-04-09"), &[]);
        assert!(matches!(result, Err(EngineError::InvalidRequest { .. })));
    }

    #[test]
    fn test_range_length_checked_before_past_date() {
        let result = validate(&candidate("free", 9, "2025-03-01", "2025-03-02"), &[]);
        assert!(matches!(result, Err(EngineError::InvalidRequest { .. })));
    }

    #[test]
    fn test_admitted_weekend_spanning_request_charges_business_days() {
        let employee = Employee {
            id: "emp_001".to_string(),
            hire_date: make_date("2021-06-01"),
            manager_id: None,
        };
        let policy = VacationPolicy::default();

        // Fri 2025-04-04 to Mon 2025-04-07: 2 business days
        let mut admitted = admit_request(
            &employee,
            &candidate("free", 4, "2025-04-04", "2025-04-07"),
            &[],
            today(),
            &policy,
        )
        .unwrap();
        assert_eq!(admitted.weekend_days, 2);
        admitted.status = RequestStatus::Approved;

        let report = compute_balance(&employee, today(), &[admitted], &policy).unwrap();
        assert_eq!(report.periods.get(2023).unwrap().free_days, dec("13"));
    }

    #[test]
    fn test_admit_request_uses_fresh_balance() {
        let employee = Employee {
            id: "emp_001".to_string(),
            hire_date: make_date("2021-06-01"),
            manager_id: None,
        };
        let history = vec![VacationRequest {
            id: "req_block".to_string(),
            employee_id: "emp_001".to_string(),
            period: 2023,
            request_type: RequestType::Block,
            requested_days: 12,
            weekend_days: 4,
            start_date: make_date("2025-01-06"),
            end_date: make_date("2025-01-17"),
            status: RequestStatus::Approved,
        }];
        let mut request = candidate("block", 4, "2025-04-07", "2025-04-10");
        request.period = 2023;

        let result = admit_request(
            &employee,
            &request,
            &history,
            today(),
            &VacationPolicy::default(),
        );
        match result {
            Err(EngineError::InsufficientBlockBalance { available, .. }) => {
                assert_eq!(available, "3");
            }
            other => panic!("Expected InsufficientBlockBalance, got {:?}", other),
        }

        request.requested_days = 3;
        request.end_date = make_date("2025-04-09");
        let admitted = admit_request(
            &employee,
            &request,
            &history,
            today(),
            &VacationPolicy::default(),
        )
        .unwrap();
        assert_eq!(admitted.period, 2023);
    }

    #[test]
    fn test_admit_request_rejects_foreign_candidate() {
        let employee = Employee {
            id: "emp_002".to_string(),
            hire_date: make_date("2021-06-01"),
            manager_id: None,
        };
        let result = admit_request(
            &employee,
            &candidate("free", 3, "2025-04-07", "2025-04-09"),
            &[],
            today(),
            &VacationPolicy::default(),
        );
        assert!(matches!(result, Err(EngineError::InvalidRequest { .. })));
    }
}
