//! Employee model, transition actors and the reporting hierarchy.
//!
//! This module defines the Employee struct, the [`Actor`] performing a
//! lifecycle transition, and [`subordinates_of`] for team reporting.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an employee accruing vacation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The date the employee was hired; accrual starts here.
    pub hire_date: NaiveDate,
    /// The employee's direct manager, if any.
    #[serde(default)]
    pub manager_id: Option<String>,
}

impl Employee {
    /// Returns true if `employee_id` is this employee's direct manager.
    ///
    /// # Examples
    ///
    /// ```
    /// use vacation_engine::models::Employee;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "emp_002".to_string(),
    ///     hire_date: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
    ///     manager_id: Some("emp_001".to_string()),
    /// };
    /// assert!(employee.is_managed_by("emp_001"));
    /// assert!(!employee.is_managed_by("emp_003"));
    /// ```
    pub fn is_managed_by(&self, employee_id: &str) -> bool {
        self.manager_id.as_deref() == Some(employee_id)
    }
}

/// The identity performing a lifecycle transition.
///
/// Authentication and role lookup happen outside the engine; the caller
/// supplies the resolved identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting employee's ID.
    pub employee_id: String,
    /// Whether the actor holds the admin role.
    #[serde(default)]
    pub is_admin: bool,
}

/// Returns every direct and indirect report of `manager_id`.
///
/// Walks the employee→manager relation breadth-first, nearest reports
/// first. A visited set stops traversal on cyclic manager chains, and the
/// manager never appears in its own result.
pub fn subordinates_of<'a>(manager_id: &str, employees: &'a [Employee]) -> Vec<&'a Employee> {
    let mut reports: HashMap<&str, Vec<&Employee>> = HashMap::new();
    for employee in employees {
        if let Some(manager) = employee.manager_id.as_deref() {
            reports.entry(manager).or_default().push(employee);
        }
    }

    let mut visited: HashSet<&str> = HashSet::from([manager_id]);
    let mut queue: VecDeque<&str> = VecDeque::from([manager_id]);
    let mut result = Vec::new();

    while let Some(current) = queue.pop_front() {
        let Some(direct) = reports.get(current) else {
            continue;
        };
        for employee in direct {
            if visited.insert(employee.id.as_str()) {
                result.push(*employee);
                queue.push_back(employee.id.as_str());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, manager: Option<&str>) -> Employee {
        Employee {
            id: id.to_string(),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            manager_id: manager.map(str::to_string),
        }
    }

    fn ids(employees: &[&Employee]) -> Vec<String> {
        employees.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_deserialize_employee_without_manager() {
        let json = r#"{"id": "emp_001", "hire_date": "2021-06-01"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.hire_date, NaiveDate::from_ymd_opt(2021, 6, 1).unwrap());
        assert_eq!(employee.manager_id, None);
    }

    #[test]
    fn test_actor_defaults_to_non_admin() {
        let actor: Actor = serde_json::from_str(r#"{"employee_id": "emp_009"}"#).unwrap();
        assert!(!actor.is_admin);
    }

    #[test]
    fn test_subordinates_breadth_first() {
        let staff = vec![
            employee("ceo", None),
            employee("cto", Some("ceo")),
            employee("cfo", Some("ceo")),
            employee("dev", Some("cto")),
            employee("intern", Some("dev")),
        ];
        let result = subordinates_of("ceo", &staff);
        assert_eq!(ids(&result), vec!["cto", "cfo", "dev", "intern"]);
    }

    #[test]
    fn test_subordinates_of_leaf_is_empty() {
        let staff = vec![employee("ceo", None), employee("dev", Some("ceo"))];
        assert!(subordinates_of("dev", &staff).is_empty());
    }

    #[test]
    fn test_subordinates_terminates_on_cycle() {
        let staff = vec![
            employee("a", Some("c")),
            employee("b", Some("a")),
            employee("c", Some("b")),
        ];
        let result = subordinates_of("a", &staff);
        assert_eq!(ids(&result), vec!["b", "c"]);
    }

    #[test]
    fn test_unknown_manager_has_no_subordinates() {
        let staff = vec![employee("dev", Some("ceo"))];
        assert!(subordinates_of("nobody", &staff).is_empty());
    }
}
