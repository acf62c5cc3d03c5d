//! Tests for the branch-and-bound backend.

use dutyroster_config::PolicyConfig;
use dutyroster_core::{EmployeeId, HardConstraint};
use dutyroster_model::{BoolVar, ConstraintKind, DutyModelBuilder, LinearObjective};
use dutyroster_test::fixtures::{date, horizon, roster};
use dutyroster_test::random::RandomRoster;

use super::construction::{Construction, Placer};
use super::local::{Climb, HillClimbing};
use super::*;

fn pick_one(costs: &[i64]) -> (CpModel, Vec<BoolVar>) {
    let mut model = CpModel::new("pick one");
    let vars: Vec<_> = (0..costs.len())
        .map(|i| model.new_bool_var(format!("x{}", i)))
        .collect();
    model.add_exactly_one(ConstraintKind::Coverage, "one", vars.clone());
    let mut objective = LinearObjective::new();
    for (&var, &cost) in vars.iter().zip(costs) {
        objective.add_term(var, cost);
    }
    model.minimize(objective);
    (model, vars)
}

fn brute_force_optimum(model: &CpModel) -> Option<i64> {
    let n = model.num_vars();
    assert!(n <= 20, "too many variables to enumerate");
    (0u32..1 << n)
        .map(|bits| (0..n).map(|i| bits & (1 << i) != 0).collect::<Vec<_>>())
        .filter(|values| model.is_satisfied_by(values))
        .map(|values| model.objective_value(&values))
        .min()
}

#[test]
fn test_picks_cheapest_variable() {
    let (model, vars) = pick_one(&[5, 2, 7]);
    let outcome = BranchAndBoundSolver::new().solve(&model, &SearchLimits::unlimited());

    assert_eq!(outcome.status, SolveStatus::Optimal);
    assert_eq!(outcome.objective, Some(2));
    assert!(outcome.value_of(vars[1]));
    assert!(!outcome.value_of(vars[0]));
    assert!(!outcome.value_of(vars[2]));
}

#[test]
fn test_root_conflict_is_infeasible() {
    let (mut model, vars) = pick_one(&[0]);
    model.add_fixed_false(ConstraintKind::Availability, "blocked", vars[0]);
    let outcome = BranchAndBoundSolver::new().solve(&model, &SearchLimits::unlimited());

    assert_eq!(outcome.status, SolveStatus::Infeasible);
    assert!(outcome.values.is_empty());
    assert_eq!(outcome.objective, None);
    assert_eq!(outcome.statistics.nodes, 0);
}

#[test]
fn test_odd_cycle_is_infeasible_after_search() {
    let mut model = CpModel::new("odd cycle");
    let a = model.new_bool_var("a");
    let b = model.new_bool_var("b");
    let c = model.new_bool_var("c");
    model.add_exactly_one(ConstraintKind::Coverage, "ab", vec![a, b]);
    model.add_exactly_one(ConstraintKind::Coverage, "bc", vec![b, c]);
    model.add_exactly_one(ConstraintKind::Coverage, "ac", vec![a, c]);

    let outcome = BranchAndBoundSolver::new().solve(&model, &SearchLimits::unlimited());
    assert_eq!(outcome.status, SolveStatus::Infeasible);
    assert!(outcome.statistics.nodes >= 1);
    assert!(outcome.statistics.backtracks >= 1);
}

#[test]
fn test_zero_node_budget_is_unknown() {
    let (model, _) = pick_one(&[1, 2]);
    let limits = SearchLimits::unlimited().with_node_limit(0);
    let outcome = BranchAndBoundSolver::new().solve(&model, &limits);

    assert_eq!(outcome.status, SolveStatus::Unknown);
    assert!(outcome.values.is_empty());
}

#[test]
fn test_invalid_model_is_reported() {
    let mut model = CpModel::new("broken");
    let a = model.new_bool_var("a");
    model.add_linear_range(ConstraintKind::Fairness, "empty range", vec![a], 1, 0);
    let outcome = BranchAndBoundSolver::new().solve(&model, &SearchLimits::unlimited());

    assert_eq!(outcome.status, SolveStatus::ModelInvalid);
}

#[test]
fn test_negative_coefficients_are_collected() {
    let mut model = CpModel::new("rewards");
    let a = model.new_bool_var("a");
    let b = model.new_bool_var("b");
    let c = model.new_bool_var("c");
    model.add_at_most_one(ConstraintKind::AntiClustering, "a or b", vec![a, b]);
    let mut objective = LinearObjective::new();
    objective.add_term(a, -3);
    objective.add_term(b, -5);
    objective.add_term(c, -1);
    model.minimize(objective);

    let outcome = BranchAndBoundSolver::new().solve(&model, &SearchLimits::unlimited());
    assert_eq!(outcome.status, SolveStatus::Optimal);
    assert_eq!(outcome.objective, Some(-6));
    assert!(outcome.value_of(b) && outcome.value_of(c) && !outcome.value_of(a));
}

#[test]
fn test_matches_brute_force_on_small_duty_model() {
    let mut employees = roster(3);
    employees[0] = employees[0].clone().with_prior_year_shift_count(40);
    employees[1] = employees[1]
        .clone()
        .with_preferred_off_date(date(2025, 3, 3))
        .with_preferred_off_date(date(2025, 3, 5));
    let constraints = [HardConstraint::new(EmployeeId(3), date(2025, 3, 4), "Course")];
    let policy = PolicyConfig {
        max_consecutive: 1,
        ..PolicyConfig::default()
    };
    // Saturday to Wednesday
    let duty = DutyModelBuilder::new(&employees, horizon(date(2025, 3, 1), date(2025, 3, 5)))
        .with_constraints(&constraints)
        .with_holidays(&[date(2025, 3, 3)])
        .with_policy(policy)
        .build()
        .unwrap();

    let expected = brute_force_optimum(&duty.model);
    let outcome = BranchAndBoundSolver::new().solve(&duty.model, &SearchLimits::unlimited());

    assert!(expected.is_some());
    assert_eq!(outcome.status, SolveStatus::Optimal);
    assert_eq!(outcome.objective, expected);
    assert!(duty.model.is_satisfied_by(&outcome.values));
}

#[test]
fn test_matches_brute_force_on_mixed_ranges() {
    let mut model = CpModel::new("mixed");
    let vars: Vec<_> = (0..8).map(|i| model.new_bool_var(format!("x{}", i))).collect();
    model.add_linear_range(ConstraintKind::Fairness, "first half", vars[..4].to_vec(), 2, 3);
    model.add_linear_range(ConstraintKind::Fairness, "second half", vars[4..].to_vec(), 1, 2);
    model.add_at_most_one(ConstraintKind::AntiClustering, "x1 x4", vec![vars[1], vars[4]]);
    model.add_exactly_one(ConstraintKind::Coverage, "x0 x7", vec![vars[0], vars[7]]);
    let mut objective = LinearObjective::new();
    for (i, &var) in vars.iter().enumerate() {
        objective.add_term(var, [4, 1, 6, 3, 2, 8, 5, 7][i]);
    }
    objective.add_term(vars[2], -4);
    model.minimize(objective);

    let outcome = BranchAndBoundSolver::new().solve(&model, &SearchLimits::unlimited());
    assert_eq!(outcome.status, SolveStatus::Optimal);
    assert_eq!(outcome.objective, brute_force_optimum(&model));
}

#[test]
fn test_budget_keeps_first_incumbent() {
    let employees = roster(5);
    let duty = DutyModelBuilder::new(&employees, horizon(date(2025, 1, 1), date(2025, 3, 1)))
        .build()
        .unwrap();
    let limits = SearchLimits::unlimited().with_node_limit(5_000);
    let outcome = BranchAndBoundSolver::new().solve(&duty.model, &limits);

    assert!(outcome.status.has_solution());
    assert!(duty.model.is_satisfied_by(&outcome.values));
    assert_eq!(
        outcome.objective,
        Some(duty.model.objective_value(&outcome.values))
    );
    assert!(outcome.statistics.nodes <= 5_000);
    assert_eq!(outcome.statistics.best_objective(), outcome.objective);
}

#[test]
fn test_same_budget_same_answer() {
    let employees = roster(6);
    let duty = DutyModelBuilder::new(&employees, horizon(date(2025, 1, 1), date(2025, 2, 28)))
        .with_holidays(&[date(2025, 1, 1), date(2025, 2, 14)])
        .build()
        .unwrap();
    let limits = SearchLimits::unlimited().with_node_limit(2_000);

    let first = BranchAndBoundSolver::new().solve(&duty.model, &limits);
    let second = BranchAndBoundSolver::new().solve(&duty.model, &limits);
    assert_eq!(first.status, second.status);
    assert_eq!(first.values, second.values);
    assert_eq!(first.objective, second.objective);
}

#[test]
fn test_propagation_forces_and_undoes() {
    let mut model = CpModel::new("at most one");
    let vars: Vec<_> = (0..3).map(|i| model.new_bool_var(format!("x{}", i))).collect();
    model.add_at_most_one(ConstraintKind::AntiClustering, "window", vars.clone());
    let mut state = SearchState::new(&model);

    assert!(state.propagate_all().is_ok());
    assert!(state.decide(0, true).is_ok());
    assert_eq!(state.trail_len(), 3);
    assert!(!state.is_free(1) && !state.is_free(2));
    assert_eq!(state.solution(), vec![true, false, false]);

    state.undo_to(0);
    assert!((0..3).all(|v| state.is_free(v)));
    assert_eq!(state.counts(0), (0, 3));
}

#[test]
fn test_lower_bound_counts_cheapest_completion() {
    let (model, _) = pick_one(&[5, 2, 7]);
    let mut state = SearchState::new(&model);
    assert_eq!(state.lower_bound(), 2);

    assert!(state.decide(1, false).is_ok());
    assert_eq!(state.lower_bound(), 5);

    assert!(state.decide(0, true).is_ok());
    assert_eq!(state.cost(), 5);
    assert_eq!(state.lower_bound(), 5);
}

#[test]
fn test_construction_builds_and_restores_root() {
    let employees = roster(4);
    let duty = DutyModelBuilder::new(&employees, horizon(date(2025, 1, 1), date(2025, 1, 14)))
        .build()
        .unwrap();
    let mut state = SearchState::new(&duty.model);
    assert!(state.propagate_all().is_ok());
    let root = state.trail_len();

    let placer = Placer::new(&state);
    assert_eq!(placer.placements().len(), 14);

    let mut scope = SearchScope::start();
    let mut statistics = SearchStatistics::new();
    let built = placer.construct(&mut state, &None::<NodeCountTermination>, &mut scope, &mut statistics);

    let values = match built {
        Construction::Built(values) => values,
        other => panic!("expected a schedule, got {:?}", other),
    };
    assert!(duty.model.is_satisfied_by(&values));
    assert_eq!(state.trail_len(), root);
    // Later days are forced by propagation once the rotation is fixed.
    assert!((1..=14).contains(&scope.nodes()));
}

#[test]
fn test_construction_reports_dead_ends() {
    let mut model = CpModel::new("odd cycle");
    let a = model.new_bool_var("a");
    let b = model.new_bool_var("b");
    let c = model.new_bool_var("c");
    model.add_exactly_one(ConstraintKind::Coverage, "ab", vec![a, b]);
    model.add_exactly_one(ConstraintKind::Coverage, "bc", vec![b, c]);
    model.add_exactly_one(ConstraintKind::Coverage, "ac", vec![a, c]);
    let mut state = SearchState::new(&model);
    assert!(state.propagate_all().is_ok());

    let placer = Placer::new(&state);
    let mut scope = SearchScope::start();
    let mut statistics = SearchStatistics::new();
    let built = placer.construct(&mut state, &None::<NodeCountTermination>, &mut scope, &mut statistics);

    assert_eq!(built, Construction::Failed);
    assert_eq!(state.trail_len(), 0);
}

#[test]
fn test_construction_stops_on_termination() {
    let employees = roster(8);
    let duty = DutyModelBuilder::new(&employees, horizon(date(2025, 1, 1), date(2025, 1, 14)))
        .build()
        .unwrap();
    let mut state = SearchState::new(&duty.model);
    assert!(state.propagate_all().is_ok());

    let placer = Placer::new(&state);
    let mut scope = SearchScope::start();
    let mut statistics = SearchStatistics::new();
    let termination = NodeCountTermination::new(3);
    let built = placer.construct(&mut state, &termination, &mut scope, &mut statistics);

    assert_eq!(built, Construction::Interrupted);
    assert_eq!(scope.nodes(), 3);
}

#[test]
fn test_hill_climbing_keeps_constraints() {
    let mut model = CpModel::new("two days");
    let vars: Vec<_> = (0..4).map(|i| model.new_bool_var(format!("x{}", i))).collect();
    model.add_exactly_one(ConstraintKind::Coverage, "day 0", vec![vars[0], vars[1]]);
    model.add_exactly_one(ConstraintKind::Coverage, "day 1", vec![vars[2], vars[3]]);
    model.add_at_most_one(ConstraintKind::AntiClustering, "x1 x3", vec![vars[1], vars[3]]);
    let mut objective = LinearObjective::new();
    for (&var, cost) in vars.iter().zip([5, 1, 5, 1]) {
        objective.add_term(var, cost);
    }
    model.minimize(objective);

    let state = SearchState::new(&model);
    let placements = [0, 1];
    let mut values = vec![true, false, true, false];
    let mut scope = SearchScope::start();
    let climb = HillClimbing::new(&placements).improve(
        &state,
        &mut values,
        &None::<NodeCountTermination>,
        &mut scope,
    );

    assert_eq!(climb, Climb::Converged);
    assert_eq!(values, vec![false, true, true, false]);
    assert!(model.is_satisfied_by(&values));
    assert_eq!(model.objective_value(&values), 6);
}

#[test]
fn test_dense_year_gets_a_schedule() {
    let h = horizon(date(2025, 1, 1), date(2025, 12, 31));
    let mut generator = RandomRoster::new(2);
    let employees = generator.employees(6, &h, 60, 5);
    let constraints = generator.constraints(&employees, &h, 300);
    let duty = DutyModelBuilder::new(&employees, h)
        .with_constraints(&constraints)
        .build()
        .unwrap();

    let limits = SearchLimits::unlimited().with_node_limit(20_000);
    let outcome = BranchAndBoundSolver::new().solve(&duty.model, &limits);

    assert!(outcome.status.has_solution(), "status {}", outcome.status);
    assert!(duty.model.is_satisfied_by(&outcome.values));
    assert_eq!(outcome.objective, outcome.statistics.best_objective());
}
