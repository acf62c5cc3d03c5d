//! Tests for the duty model builder.

use dutyroster_test::fixtures::{date, roster};

use super::*;

fn horizon(days: u32) -> Horizon {
    Horizon::new(date(2025, 3, 1), date(2025, 3, days)).unwrap()
}

#[test]
fn test_empty_roster_is_rejected() {
    let err = DutyModelBuilder::new(&[], horizon(5)).build().unwrap_err();
    assert_eq!(err, DutyRosterError::EmptyRoster);
}

#[test]
fn test_constraint_counts_per_kind() {
    let employees = roster(3);
    let duty = DutyModelBuilder::new(&employees, horizon(10)).build().unwrap();
    let model = &duty.model;

    assert_eq!(model.num_vars(), 30);
    assert_eq!(model.constraint_count_of(ConstraintKind::Coverage), 10);
    assert_eq!(model.constraint_count_of(ConstraintKind::Availability), 0);
    assert_eq!(model.constraint_count_of(ConstraintKind::Fairness), 3);
    // 10 days, window 4: 7 windows per employee
    assert_eq!(model.constraint_count_of(ConstraintKind::AntiClustering), 21);
    assert!(model.validate().is_ok());
}

#[test]
fn test_constraints_added_in_order() {
    let employees = roster(2);
    let blocked = [HardConstraint::new(EmployeeId(1), date(2025, 3, 2), "Training")];
    let duty = DutyModelBuilder::new(&employees, horizon(5))
        .with_constraints(&blocked)
        .build()
        .unwrap();

    let kinds: Vec<_> = duty.model.constraints().iter().map(|c| c.kind).collect();
    let first_of = |kind: ConstraintKind| kinds.iter().position(|k| *k == kind).unwrap();
    assert!(first_of(ConstraintKind::Coverage) < first_of(ConstraintKind::Availability));
    assert!(first_of(ConstraintKind::Availability) < first_of(ConstraintKind::Fairness));
    assert!(first_of(ConstraintKind::Fairness) < first_of(ConstraintKind::AntiClustering));
}

#[test]
fn test_availability_forces_variable_off() {
    let employees = roster(2);
    let blocked = [HardConstraint::new(EmployeeId(2), date(2025, 3, 3), "Vacation")];
    let duty = DutyModelBuilder::new(&employees, horizon(5))
        .with_constraints(&blocked)
        .build()
        .unwrap();

    let availability: Vec<_> = duty
        .model
        .constraints()
        .iter()
        .filter(|c| c.kind == ConstraintKind::Availability)
        .collect();
    assert_eq!(availability.len(), 1);
    assert_eq!(availability[0].vars, vec![duty.grid.var(1, 2)]);
    assert_eq!((availability[0].min, availability[0].max), (0, 0));
    assert!(availability[0].label.starts_with("Vacation"));
}

#[test]
fn test_out_of_range_constraints_are_ignored_and_counted() {
    let employees = roster(2);
    let constraints = [
        HardConstraint::new(EmployeeId(99), date(2025, 3, 2), "Unknown employee"),
        HardConstraint::new(EmployeeId(1), date(2025, 4, 2), "Outside horizon"),
        HardConstraint::new(EmployeeId(1), date(2025, 3, 2), "Valid").flexible(),
    ];
    let duty = DutyModelBuilder::new(&employees, horizon(5))
        .with_constraints(&constraints)
        .build()
        .unwrap();

    assert_eq!(duty.report.admin_constraints, 3);
    assert_eq!(duty.report.applied_constraints, 1);
    assert_eq!(duty.report.ignored_constraints, 2);
    assert_eq!(duty.model.constraint_count_of(ConstraintKind::Availability), 1);
}

#[test]
fn test_duplicate_constraints_are_applied_once() {
    let employees = roster(2);
    let constraints = [
        HardConstraint::new(EmployeeId(1), date(2025, 3, 2), "Course"),
        HardConstraint::new(EmployeeId(1), date(2025, 3, 2), "Course, again"),
    ];
    let duty = DutyModelBuilder::new(&employees, horizon(5))
        .with_constraints(&constraints)
        .build()
        .unwrap();

    assert_eq!(duty.report.applied_constraints, 1);
    assert_eq!(duty.report.ignored_constraints, 0);
}

#[test]
fn test_fully_blocked_day_is_reported() {
    let employees = roster(2);
    let constraints = [
        HardConstraint::new(EmployeeId(1), date(2025, 3, 4), "Off"),
        HardConstraint::new(EmployeeId(2), date(2025, 3, 4), "Off"),
        HardConstraint::new(EmployeeId(2), date(2025, 3, 5), "Off"),
    ];
    let duty = DutyModelBuilder::new(&employees, horizon(5))
        .with_constraints(&constraints)
        .build()
        .unwrap();

    assert_eq!(duty.report.fully_blocked_days, vec![date(2025, 3, 4)]);
}

#[test]
fn test_fairness_bands_on_model() {
    let employees = roster(3);
    let duty = DutyModelBuilder::new(&employees, horizon(31)).build().unwrap();

    let bands: Vec<_> = duty
        .model
        .constraints()
        .iter()
        .filter(|c| c.kind == ConstraintKind::Fairness)
        .map(|c| (c.vars.len(), c.min, c.max))
        .collect();
    // base 10, remainder 1
    assert_eq!(bands, vec![(31, 5, 16), (31, 5, 15), (31, 5, 15)]);
    assert_eq!(duty.report.fairness.base, 10);
}

#[test]
fn test_prior_year_imbalance_warning() {
    let mut employees = roster(3);
    employees[1] = employees[1].clone().with_prior_year_shift_count(16);
    employees[2] = employees[2].clone().with_prior_year_shift_count(15);
    let duty = DutyModelBuilder::new(&employees, horizon(30)).build().unwrap();

    // base 10, threshold 15
    assert_eq!(
        duty.warnings,
        vec![format!(
            "Employee {} worked significantly more shifts last year (16). Will try to balance assignments.",
            employees[1].name
        )]
    );
}

#[test]
fn test_short_horizon_has_no_windows() {
    let employees = roster(2);
    let duty = DutyModelBuilder::new(&employees, horizon(3)).build().unwrap();
    assert_eq!(duty.model.constraint_count_of(ConstraintKind::AntiClustering), 0);
}

#[test]
fn test_zero_max_consecutive_disables_windows() {
    let employees = roster(2);
    let policy = PolicyConfig {
        max_consecutive: 0,
        ..PolicyConfig::default()
    };
    let duty = DutyModelBuilder::new(&employees, horizon(10))
        .with_policy(policy)
        .build()
        .unwrap();
    assert_eq!(duty.model.constraint_count_of(ConstraintKind::AntiClustering), 0);
}

#[test]
fn test_holidays_reach_the_objective() {
    let employees = roster(1);
    // 2025-03-03 is a Monday
    let plain = DutyModelBuilder::new(&employees, horizon(3)).build().unwrap();
    let with_holiday = DutyModelBuilder::new(&employees, horizon(3))
        .with_holidays(&[date(2025, 3, 3)])
        .build()
        .unwrap();

    let monday = plain.grid.var(0, 2);
    let coefficient = |duty: &DutyModel| duty.model.objective().coefficients(3)[monday.index()];
    assert_eq!(coefficient(&plain), 0);
    assert_eq!(coefficient(&with_holiday), 50);
}
