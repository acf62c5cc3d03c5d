//! Built-in branch-and-bound backend.
//!
//! A solve runs three phases on one propagated root:
//! 1. construction fills the exactly-one constraints in order and seeds
//!    the incumbent;
//! 2. hill climbing over change moves lowers its cost;
//! 3. depth-first branch and bound, pruned against the incumbent, improves
//!    it further and proves optimality or infeasibility when it exhausts.
//!
//! The search is fully deterministic: for a fixed model and node budget
//! it always visits the same nodes and returns the same assignment.

mod bound;
mod branching;
mod construction;
mod local;
mod propagation;

use dutyroster_core::SolveStatus;
use dutyroster_model::CpModel;
use tracing::{debug, warn};

use crate::backend::{SearchLimits, SolveOutcome, SolverBackend};
use crate::scope::SearchScope;
use crate::statistics::{Improvement, SearchStatistics};
use crate::termination::{NodeCountTermination, OrTermination, Termination, TimeTermination};

use branching::{Brancher, Decision};
use construction::{Construction, Placer};
use local::{Climb, HillClimbing};
use propagation::SearchState;

/// Depth-first branch-and-bound solver.
///
/// # Status mapping
///
/// | Search ended | Incumbent | Status |
/// |---|---|---|
/// | exhausted | yes | `Optimal` |
/// | exhausted | no | `Infeasible` |
/// | budget hit | yes | `Feasible` |
/// | budget hit | no | `Unknown` |
///
/// A model that fails [`CpModel::validate`] yields `ModelInvalid`.
///
/// # Example
///
/// ```
/// use dutyroster_core::SolveStatus;
/// use dutyroster_model::{ConstraintKind, CpModel, LinearObjective};
/// use dutyroster_solver::{BranchAndBoundSolver, SearchLimits, SolverBackend};
///
/// let mut model = CpModel::new("pick one");
/// let a = model.new_bool_var("a");
/// let b = model.new_bool_var("b");
/// model.add_exactly_one(ConstraintKind::Coverage, "one of two", vec![a, b]);
/// let mut objective = LinearObjective::new();
/// objective.add_term(a, 5);
/// objective.add_term(b, 2);
/// model.minimize(objective);
///
/// let outcome = BranchAndBoundSolver::new().solve(&model, &SearchLimits::unlimited());
/// assert_eq!(outcome.status, SolveStatus::Optimal);
/// assert!(outcome.value_of(b));
/// assert_eq!(outcome.objective, Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BranchAndBoundSolver;

impl BranchAndBoundSolver {
    pub fn new() -> Self {
        Self
    }
}

impl SolverBackend for BranchAndBoundSolver {
    fn name(&self) -> &'static str {
        "branch_and_bound"
    }

    fn solve(&self, model: &CpModel, limits: &SearchLimits) -> SolveOutcome {
        let mut scope = SearchScope::start();
        let mut statistics = SearchStatistics::new();

        if let Err(err) = model.validate() {
            warn!(event = "model_invalid", model = model.name(), error = %err);
            statistics.elapsed = scope.elapsed();
            return SolveOutcome::without_solution(SolveStatus::ModelInvalid, statistics);
        }

        let termination = OrTermination::new((
            limits.time_limit.map(TimeTermination::new),
            limits.node_limit.map(NodeCountTermination::new),
        ));

        let mut search = Search::new(model);
        debug!(
            event = "search_start",
            model = model.name(),
            variables = model.num_vars(),
            constraints = model.constraint_count(),
            bound_groups = search.state.bound_groups(),
        );
        let exit = search.run(&termination, &mut scope, &mut statistics);
        statistics.nodes = scope.nodes();
        statistics.elapsed = scope.elapsed();

        let status = match (exit, search.incumbent.is_some()) {
            (Exit::Exhausted, true) => SolveStatus::Optimal,
            (Exit::Exhausted, false) => SolveStatus::Infeasible,
            (Exit::Interrupted, true) => SolveStatus::Feasible,
            (Exit::Interrupted, false) => SolveStatus::Unknown,
        };
        debug!(
            event = "search_end",
            status = %status,
            nodes = statistics.nodes,
            backtracks = statistics.backtracks,
            solutions = statistics.solutions_found,
            duration_ms = statistics.elapsed.as_millis() as u64,
        );

        match search.incumbent {
            Some((values, objective)) => SolveOutcome {
                status,
                values,
                objective: Some(objective),
                statistics,
            },
            None => SolveOutcome::without_solution(status, statistics),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Exhausted,
    Interrupted,
}

/// A decision on the stack: the trail length before it, the variable,
/// and whether the false branch has been entered.
#[derive(Debug)]
struct Frame {
    mark: usize,
    var: usize,
    false_tried: bool,
}

struct Search<'m> {
    model: &'m CpModel,
    state: SearchState<'m>,
    brancher: Brancher,
    frames: Vec<Frame>,
    incumbent: Option<(Vec<bool>, i64)>,
}

impl<'m> Search<'m> {
    fn new(model: &'m CpModel) -> Self {
        let state = SearchState::new(model);
        let brancher = Brancher::new(&state);
        Self {
            model,
            state,
            brancher,
            frames: Vec::new(),
            incumbent: None,
        }
    }

    fn run<T: Termination>(
        &mut self,
        termination: &T,
        scope: &mut SearchScope,
        statistics: &mut SearchStatistics,
    ) -> Exit {
        if let Err(conflict) = self.state.propagate_all() {
            debug!(
                event = "root_conflict",
                constraint = %self.model.constraints()[conflict.constraint].label,
            );
            return Exit::Exhausted;
        }

        let placer = Placer::new(&self.state);
        match placer.construct(&mut self.state, termination, scope, statistics) {
            Construction::Built(mut values) => {
                debug!(
                    event = "construction_end",
                    placements = placer.placements().len(),
                    nodes = scope.nodes(),
                );
                statistics.solutions_found += 1;
                self.offer(values.clone(), scope, statistics);

                let climb = HillClimbing::new(placer.placements()).improve(
                    &self.state,
                    &mut values,
                    termination,
                    scope,
                );
                self.offer(values, scope, statistics);
                if climb == Climb::Interrupted {
                    return Exit::Interrupted;
                }
            }
            Construction::Failed => {
                debug!(event = "construction_failed", nodes = scope.nodes());
            }
            Construction::Interrupted => return Exit::Interrupted,
        }

        loop {
            if termination.is_terminated(scope) {
                return Exit::Interrupted;
            }
            scope.increment_nodes();

            let pruned = self
                .incumbent
                .as_ref()
                .is_some_and(|(_, best)| self.state.lower_bound() >= *best);
            if !pruned {
                match self.brancher.next(&self.state) {
                    Decision::Branch(var) => {
                        self.frames.push(Frame {
                            mark: self.state.trail_len(),
                            var,
                            false_tried: false,
                        });
                        if self.state.decide(var, true).is_ok() {
                            continue;
                        }
                    }
                    Decision::Complete => self.record_solution(scope, statistics),
                }
            }

            if !self.backtrack(statistics) {
                return Exit::Exhausted;
            }
        }
    }

    /// Moves to the next open branch; false when the tree is exhausted.
    fn backtrack(&mut self, statistics: &mut SearchStatistics) -> bool {
        while let Some(frame) = self.frames.last_mut() {
            statistics.backtracks += 1;
            self.state.undo_to(frame.mark);
            if frame.false_tried {
                self.frames.pop();
                continue;
            }
            frame.false_tried = true;
            let var = frame.var;
            if self.state.decide(var, false).is_ok() {
                return true;
            }
        }
        false
    }

    fn record_solution(&mut self, scope: &SearchScope, statistics: &mut SearchStatistics) {
        statistics.solutions_found += 1;
        let objective = self.state.cost();
        if self.incumbent.as_ref().is_some_and(|(_, best)| objective >= *best) {
            return;
        }
        let values = self.state.solution();
        debug_assert_eq!(self.model.objective_value(&values), objective);
        self.offer(values, scope, statistics);
    }

    /// Keeps `values` as the incumbent if it beats the current one.
    fn offer(&mut self, values: Vec<bool>, scope: &SearchScope, statistics: &mut SearchStatistics) {
        debug_assert!(self.model.is_satisfied_by(&values));
        let objective = self.model.objective_value(&values);
        if self.incumbent.as_ref().is_some_and(|(_, best)| objective >= *best) {
            return;
        }

        let improvement = Improvement {
            node: scope.nodes(),
            elapsed: scope.elapsed(),
            objective,
        };
        debug!(
            event = "incumbent",
            node = improvement.node,
            objective = objective,
            elapsed_ms = improvement.elapsed.as_millis() as u64,
        );
        statistics.improvements.push(improvement);
        self.incumbent = Some((values, objective));
    }
}

#[cfg(test)]
mod tests;
