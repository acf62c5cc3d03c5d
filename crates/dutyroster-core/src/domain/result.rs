//! Outcome of one scheduling invocation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{Assignment, EmployeeId, SolveStatus};

/// Result of a scheduling run, returned to the caller and never mutated.
///
/// On success `assignments` holds exactly one entry per day of the horizon,
/// in chronological order. On failure it is empty and `warnings` explains
/// why.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulingResult {
    pub success: bool,
    pub assignments: Vec<Assignment>,
    pub warnings: Vec<String>,
    /// Terminal solver state; `None` when no solve was attempted.
    pub status: Option<SolveStatus>,
    /// Objective value of the returned schedule.
    pub objective: Option<i64>,
}

impl SchedulingResult {
    /// Creates a successful result.
    pub fn solved(
        status: SolveStatus,
        assignments: Vec<Assignment>,
        warnings: Vec<String>,
        objective: i64,
    ) -> Self {
        Self {
            success: true,
            assignments,
            warnings,
            status: Some(status),
            objective: Some(objective),
        }
    }

    /// Creates a failed result after the solver ran.
    pub fn unsolved(status: SolveStatus, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            assignments: Vec::new(),
            warnings,
            status: Some(status),
            objective: None,
        }
    }

    /// Creates a failed result for inputs rejected before solving.
    pub fn rejected(warnings: Vec<String>) -> Self {
        Self {
            success: false,
            assignments: Vec::new(),
            warnings,
            status: None,
            objective: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns all assignments of one employee, in chronological order.
    pub fn assignments_for(&self, employee_id: EmployeeId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .collect()
    }

    /// Returns the assignment on `date`, if any.
    pub fn assignment_on(&self, date: NaiveDate) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.date == date)
    }

    /// Counts assigned days per employee.
    pub fn shift_counts(&self) -> BTreeMap<EmployeeId, usize> {
        let mut counts = BTreeMap::new();
        for assignment in &self.assignments {
            *counts.entry(assignment.employee_id).or_insert(0) += 1;
        }
        counts
    }
}
