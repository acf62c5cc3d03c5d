//! Tests for domain types.

use chrono::NaiveDate;

use super::*;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

#[test]
fn test_employee_builder() {
    let bob = Employee::new(7, "Bob")
        .with_prior_year_shift_count(42)
        .with_preferred_off_dates([date(12, 24), date(12, 31)])
        .inactive();

    assert_eq!(bob.id, EmployeeId(7));
    assert!(!bob.active);
    assert_eq!(bob.prior_year_shift_count, 42);
    assert!(bob.prefers_off(date(12, 31)));
    assert!(!bob.prefers_off(date(1, 1)));
}

#[test]
fn test_hard_constraint_flexible_flag() {
    let rigid = HardConstraint::new(EmployeeId(1), date(3, 3), "Training");
    let flexible = rigid.clone().flexible();
    assert!(!rigid.flexible);
    assert!(flexible.flexible);
    assert_eq!(flexible.reason, "Training");
}

#[test]
fn test_result_queries() {
    let result = SchedulingResult::solved(
        SolveStatus::Optimal,
        vec![
            Assignment::new(EmployeeId(1), date(1, 1)),
            Assignment::new(EmployeeId(2), date(1, 2)),
            Assignment::new(EmployeeId(1), date(1, 3)),
        ],
        vec![],
        12,
    );

    assert!(result.is_success());
    assert_eq!(result.objective, Some(12));
    assert_eq!(result.assignments_for(EmployeeId(1)).len(), 2);
    assert_eq!(
        result.assignment_on(date(1, 2)).map(|a| a.employee_id),
        Some(EmployeeId(2))
    );
    assert_eq!(result.assignment_on(date(1, 4)), None);

    let counts = result.shift_counts();
    assert_eq!(counts[&EmployeeId(1)], 2);
    assert_eq!(counts[&EmployeeId(2)], 1);
}

#[test]
fn test_failed_results_carry_no_assignments() {
    let unsolved = SchedulingResult::unsolved(SolveStatus::Infeasible, vec!["x".into()]);
    assert!(!unsolved.success);
    assert!(unsolved.assignments.is_empty());
    assert_eq!(unsolved.status, Some(SolveStatus::Infeasible));

    let rejected = SchedulingResult::rejected(vec!["No active employees found".into()]);
    assert_eq!(rejected.status, None);
    assert_eq!(rejected.objective, None);
}

#[test]
fn test_status_display_and_solution_flag() {
    assert_eq!(SolveStatus::Optimal.to_string(), "OPTIMAL");
    assert_eq!(SolveStatus::ModelInvalid.to_string(), "MODEL_INVALID");
    assert!(SolveStatus::Feasible.has_solution());
    assert!(!SolveStatus::Unknown.has_solution());
}
