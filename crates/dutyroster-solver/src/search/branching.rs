//! Variable selection.
//!
//! The next decision is taken from the unmet demand constraint with the
//! fewest free variables (ties to the lowest index). Within it, variables
//! that also help another demand constraint running behind its pace come
//! first, then cheaper objective coefficients, then lower indices. A
//! demand constraint is behind when its true count trails the middle of
//! its range scaled by the share of its variables already decided.
//!
//! Once every demand is met, only free variables with a negative
//! coefficient are worth branching on; everything else stays false.

use super::propagation::SearchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    /// Try this variable as true, then as false.
    Branch(usize),
    /// Every remaining free variable can be set to false.
    Complete,
}

#[derive(Debug)]
pub(crate) struct Brancher {
    /// Constraints with `min > 0`.
    demands: Vec<usize>,
    /// Variables with a negative coefficient, cheapest first.
    rewarding: Vec<usize>,
}

impl Brancher {
    pub(crate) fn new(state: &SearchState<'_>) -> Self {
        let demands = state
            .constraints()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.min > 0)
            .map(|(i, _)| i)
            .collect();
        let mut rewarding: Vec<usize> = (0..state.num_vars())
            .filter(|&v| state.coefficient(v) < 0)
            .collect();
        rewarding.sort_by_key(|&v| (state.coefficient(v), v));
        Self { demands, rewarding }
    }

    pub(crate) fn next(&self, state: &SearchState<'_>) -> Decision {
        let constraints = state.constraints();

        let mut chosen: Option<(u32, usize)> = None;
        for &c in &self.demands {
            let (t, f) = state.counts(c);
            if t >= constraints[c].min || f == 0 {
                continue;
            }
            if chosen.map_or(true, |(best, _)| f < best) {
                chosen = Some((f, c));
            }
        }

        if let Some((_, c)) = chosen {
            let var = constraints[c]
                .vars
                .iter()
                .map(|v| v.index())
                .filter(|&v| state.is_free(v))
                .min_by_key(|&v| (!behind_elsewhere(state, v, c), state.coefficient(v), v));
            if let Some(var) = var {
                return Decision::Branch(var);
            }
        }

        match self.rewarding.iter().find(|&&v| state.is_free(v)) {
            Some(&var) => Decision::Branch(var),
            None => Decision::Complete,
        }
    }
}

/// True if `var` sits in an unmet demand constraint other than `except`
/// that is behind its pace.
fn behind_elsewhere(state: &SearchState<'_>, var: usize, except: usize) -> bool {
    let constraints = state.constraints();
    state.constraints_of(var).iter().any(|&c| {
        let c = c as usize;
        let constraint = &constraints[c];
        if c == except || constraint.min == 0 {
            return false;
        }
        let (t, f) = state.counts(c);
        if t >= constraint.min {
            return false;
        }
        let size = constraint.vars.len() as u64;
        let decided = size - u64::from(f);
        let middle_twice = u64::from(constraint.min) + u64::from(constraint.max.min(size as u32));
        2 * u64::from(t) * size < middle_twice * decided
    })
}
