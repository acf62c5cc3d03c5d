//! Deterministic roster fixtures.

use chrono::NaiveDate;
use dutyroster_core::{Employee, EmployeeId, HardConstraint, Horizon};

/// Shorthand for a valid calendar date.
///
/// # Panics
///
/// Panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid date {}-{}-{}", year, month, day))
}

/// `n` active employees with ids `1..=n`, named "Employee 1" and so on.
pub fn roster(n: u64) -> Vec<Employee> {
    (1..=n)
        .map(|id| Employee::new(id, format!("Employee {}", id)))
        .collect()
}

/// Inclusive horizon between two dates.
///
/// # Panics
///
/// Panics if `end < start`.
pub fn horizon(start: NaiveDate, end: NaiveDate) -> Horizon {
    Horizon::new(start, end).unwrap_or_else(|e| panic!("{}", e))
}

/// Blocks `employee` on every day of `horizon`.
pub fn block_every_day(employee: EmployeeId, horizon: &Horizon) -> Vec<HardConstraint> {
    horizon
        .days()
        .map(|(_, day)| HardConstraint::new(employee, day, "Unavailable"))
        .collect()
}
