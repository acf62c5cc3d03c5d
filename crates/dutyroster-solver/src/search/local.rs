//! Hill climbing over change moves.
//!
//! A change move hands an exactly-one constraint from its true variable to
//! another one. Only moves that keep every constraint satisfied and lower
//! the objective are taken, so the climb stops at a local optimum.

use super::propagation::SearchState;
use crate::scope::SearchScope;
use crate::termination::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Climb {
    /// A full pass found no improving move.
    Converged,
    Interrupted,
}

#[derive(Debug)]
pub(crate) struct HillClimbing<'p> {
    placements: &'p [usize],
}

impl<'p> HillClimbing<'p> {
    pub(crate) fn new(placements: &'p [usize]) -> Self {
        Self { placements }
    }

    /// Improves `values` in place. `values` must satisfy the model.
    ///
    /// Each pass visits every placement once and takes its cheapest
    /// feasible move.
    pub(crate) fn improve<T: Termination>(
        &self,
        state: &SearchState<'_>,
        values: &mut [bool],
        termination: &T,
        scope: &mut SearchScope,
    ) -> Climb {
        let constraints = state.constraints();
        let mut counts: Vec<u32> = constraints
            .iter()
            .map(|c| c.vars.iter().filter(|v| values[v.index()]).count() as u32)
            .collect();

        loop {
            let mut improved = false;
            for &placement in self.placements {
                if termination.is_terminated(scope) {
                    return Climb::Interrupted;
                }
                scope.increment_nodes();

                let vars = &constraints[placement].vars;
                let Some(from) = vars.iter().map(|v| v.index()).find(|&v| values[v]) else {
                    continue;
                };
                let to = vars
                    .iter()
                    .map(|v| v.index())
                    .filter(|&v| !values[v] && state.coefficient(v) < state.coefficient(from))
                    .filter(|&v| can_change(state, &counts, from, v))
                    .min_by_key(|&v| (state.coefficient(v), v));

                if let Some(to) = to {
                    values[from] = false;
                    values[to] = true;
                    for &c in state.constraints_of(from) {
                        counts[c as usize] -= 1;
                    }
                    for &c in state.constraints_of(to) {
                        counts[c as usize] += 1;
                    }
                    improved = true;
                }
            }
            if !improved {
                return Climb::Converged;
            }
        }
    }
}

/// True if turning `from` off and `to` on keeps every constraint in range.
fn can_change(state: &SearchState<'_>, counts: &[u32], from: usize, to: usize) -> bool {
    let constraints = state.constraints();
    let from_of = state.constraints_of(from);
    let to_of = state.constraints_of(to);

    let losing = from_of
        .iter()
        .filter(|&&c| !to_of.contains(&c))
        .all(|&c| counts[c as usize] > constraints[c as usize].min);
    let gaining = to_of
        .iter()
        .filter(|&&c| !from_of.contains(&c))
        .all(|&c| counts[c as usize] < constraints[c as usize].max);
    losing && gaining
}
