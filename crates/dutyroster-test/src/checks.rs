//! Assertions for the scheduling properties.
//!
//! Each checker panics with a descriptive message on the first violation.

use std::collections::{BTreeMap, BTreeSet};

use dutyroster_core::{Employee, HardConstraint, Horizon, SchedulingResult};

/// Exactly one assignment per day, in chronological order.
pub fn assert_coverage(result: &SchedulingResult, horizon: &Horizon) {
    assert!(result.success, "expected a successful result: {:?}", result.warnings);
    assert_eq!(
        result.assignments.len(),
        horizon.num_days(),
        "one assignment per day"
    );
    for ((_, day), assignment) in horizon.days().zip(&result.assignments) {
        assert_eq!(assignment.date, day, "assignments out of order");
    }
}

/// No assignment coincides with an admin constraint.
pub fn assert_respects_constraints(result: &SchedulingResult, constraints: &[HardConstraint]) {
    let blocked: BTreeSet<_> = constraints.iter().map(|c| (c.employee_id, c.date)).collect();
    for assignment in &result.assignments {
        assert!(
            !blocked.contains(&(assignment.employee_id, assignment.date)),
            "employee {} assigned on blocked day {}",
            assignment.employee_id,
            assignment.date
        );
    }
}

/// Every employee's count lies in `[max(floor, base - slack), base + 1 + slack]`.
pub fn assert_fairness(
    result: &SchedulingResult,
    employees: &[Employee],
    num_days: usize,
    slack: usize,
    floor: usize,
) {
    let base = num_days / employees.len();
    let min = base.saturating_sub(slack).max(floor);
    let max = base + 1 + slack;
    let counts = result.shift_counts();
    for employee in employees {
        let count = counts.get(&employee.id).copied().unwrap_or(0);
        assert!(
            (min..=max).contains(&count),
            "employee {} has {} shifts, expected {}..={}",
            employee.id,
            count,
            min,
            max
        );
    }
}

/// No employee appears twice within any `window` consecutive days.
pub fn assert_anti_clustering(result: &SchedulingResult, window: usize) {
    let mut days_by_employee = BTreeMap::new();
    for assignment in &result.assignments {
        days_by_employee
            .entry(assignment.employee_id)
            .or_insert_with(Vec::new)
            .push(assignment.date);
    }
    for (employee, days) in days_by_employee {
        for pair in days.windows(2) {
            let gap = (pair[1] - pair[0]).num_days();
            assert!(
                gap >= window as i64,
                "employee {} on duty {} and {}, closer than {} days",
                employee,
                pair[0],
                pair[1],
                window
            );
        }
    }
}
