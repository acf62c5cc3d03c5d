//! Construction phase.
//!
//! Every exactly-one constraint is a placement. Placements are filled in
//! constraint order, propagating after each one, so a duty model is built
//! day by day. Candidates whose other demand constraints trail their pace
//! the most come first, cheaper coefficients break ties. A dead end undoes
//! the most recent placement and moves on to its next candidate, within a
//! backtrack budget.

use super::propagation::SearchState;
use crate::scope::SearchScope;
use crate::statistics::SearchStatistics;
use crate::termination::Termination;

/// Backtracks allowed per placement before construction gives up.
const BACKTRACKS_PER_PLACEMENT: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Construction {
    /// A full assignment satisfying every constraint.
    Built(Vec<bool>),
    /// Budget exhausted or no candidate left.
    Failed,
    Interrupted,
}

#[derive(Debug)]
pub(crate) struct Placer {
    placements: Vec<usize>,
    /// Free variables per constraint after root propagation.
    root_free: Vec<u32>,
}

/// An open placement: candidates left to try once the current one fails.
#[derive(Debug)]
struct Step {
    position: usize,
    mark: usize,
    candidates: Vec<usize>,
    next: usize,
}

impl Placer {
    /// Expects `state` at the propagated root.
    pub(crate) fn new(state: &SearchState<'_>) -> Self {
        let constraints = state.constraints();
        let placements = constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| c.min == 1 && c.max == 1)
            .map(|(i, _)| i)
            .collect();
        let root_free = (0..constraints.len()).map(|c| state.counts(c).1).collect();
        Self {
            placements,
            root_free,
        }
    }

    pub(crate) fn placements(&self) -> &[usize] {
        &self.placements
    }

    /// Builds a first assignment. `state` is back at its starting trail
    /// length on return.
    pub(crate) fn construct<T: Termination>(
        &self,
        state: &mut SearchState<'_>,
        termination: &T,
        scope: &mut SearchScope,
        statistics: &mut SearchStatistics,
    ) -> Construction {
        let root = state.trail_len();
        let budget = self.placements.len().max(1) * BACKTRACKS_PER_PLACEMENT;
        let mut backtracks = 0;
        let mut steps: Vec<Step> = Vec::new();
        let mut position = 0;

        loop {
            while position < self.placements.len()
                && state.counts(self.placements[position]).0 > 0
            {
                position += 1;
            }

            if position == self.placements.len() {
                if demands_met(state) {
                    let values = state.solution();
                    state.undo_to(root);
                    return Construction::Built(values);
                }
            } else {
                if termination.is_terminated(scope) {
                    state.undo_to(root);
                    return Construction::Interrupted;
                }
                scope.increment_nodes();
                let placement = self.placements[position];
                steps.push(Step {
                    position,
                    mark: state.trail_len(),
                    candidates: self.candidates(state, placement),
                    next: 0,
                });
            }

            loop {
                let Some(step) = steps.last_mut() else {
                    state.undo_to(root);
                    return Construction::Failed;
                };
                state.undo_to(step.mark);
                let candidate = step.candidates.get(step.next).copied();
                if let Some(var) = candidate {
                    step.next += 1;
                    if state.decide(var, true).is_ok() {
                        position = step.position + 1;
                        break;
                    }
                } else {
                    steps.pop();
                    backtracks += 1;
                    statistics.backtracks += 1;
                    if backtracks > budget {
                        state.undo_to(root);
                        return Construction::Failed;
                    }
                }
            }
        }
    }

    /// Free variables of `placement`, most behind first.
    fn candidates(&self, state: &SearchState<'_>, placement: usize) -> Vec<usize> {
        let mut keyed: Vec<(i64, i64, usize)> = state.constraints()[placement]
            .vars
            .iter()
            .map(|v| v.index())
            .filter(|&v| state.is_free(v))
            .map(|v| (-self.lag(state, v, placement), state.coefficient(v), v))
            .collect();
        keyed.sort_unstable();
        keyed.into_iter().map(|(_, _, v)| v).collect()
    }

    /// Whole units by which the furthest-behind demand constraint of `var`,
    /// other than `except`, trails the middle of its range.
    ///
    /// Pace is measured against the variables that were still free at the
    /// root, so variables blocked up front do not count as progress.
    fn lag(&self, state: &SearchState<'_>, var: usize, except: usize) -> i64 {
        let constraints = state.constraints();
        state
            .constraints_of(var)
            .iter()
            .map(|&c| c as usize)
            .filter(|&c| c != except && constraints[c].min > 0 && self.root_free[c] > 0)
            .map(|c| {
                let constraint = &constraints[c];
                let (t, f) = state.counts(c);
                let size = constraint.vars.len() as u32;
                let middle = f64::from(constraint.min + constraint.max.min(size)) / 2.0;
                let root_free = self.root_free[c];
                let progress = f64::from(root_free - f) / f64::from(root_free);
                (middle * progress - f64::from(t)).floor() as i64
            })
            .max()
            .unwrap_or(0)
    }
}

fn demands_met(state: &SearchState<'_>) -> bool {
    state
        .constraints()
        .iter()
        .enumerate()
        .all(|(c, constraint)| state.counts(c).0 >= constraint.min)
}
