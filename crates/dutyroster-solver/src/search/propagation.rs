//! Trail-based propagation of cardinality constraints.
//!
//! For `min <= Σ vars <= max` with `t` variables true and `f` free:
//! - `t > max` or `t + f < min` is a conflict;
//! - `t == max` forces every free variable to false;
//! - `t + f == min` forces every free variable to true.
//!
//! Every assignment is pushed on a trail so the search can undo back to
//! any earlier decision.

use dutyroster_model::{Cardinality, CpModel};
use smallvec::SmallVec;

use super::bound::LowerBound;

/// A constraint that can no longer be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Conflict {
    pub(crate) constraint: usize,
}

#[derive(Debug)]
pub(crate) struct SearchState<'m> {
    constraints: &'m [Cardinality],
    coefficients: Vec<i64>,
    /// Variable -> constraints it appears in.
    watches: Vec<SmallVec<[u32; 8]>>,
    values: Vec<Option<bool>>,
    num_true: Vec<u32>,
    num_free: Vec<u32>,
    trail: Vec<usize>,
    queue: Vec<usize>,
    cost: i64,
    /// Sum of negative coefficients over free variables.
    negative_free: i64,
    bound: LowerBound,
}

impl<'m> SearchState<'m> {
    pub(crate) fn new(model: &'m CpModel) -> Self {
        let num_vars = model.num_vars();
        let constraints = model.constraints();
        let coefficients = model.objective().coefficients(num_vars);

        let mut watches: Vec<SmallVec<[u32; 8]>> = vec![SmallVec::new(); num_vars];
        for (c, constraint) in constraints.iter().enumerate() {
            for var in &constraint.vars {
                watches[var.index()].push(c as u32);
            }
        }

        let values = vec![None; num_vars];
        let num_true = vec![0; constraints.len()];
        let num_free: Vec<u32> = constraints.iter().map(|c| c.vars.len() as u32).collect();
        let negative_free = coefficients.iter().filter(|&&c| c < 0).sum();

        let mut bound = LowerBound::new(constraints, num_vars);
        bound.refresh_all(constraints, &values, &num_true, &coefficients);

        Self {
            constraints,
            coefficients,
            watches,
            values,
            num_true,
            num_free,
            trail: Vec::with_capacity(num_vars),
            queue: Vec::new(),
            cost: 0,
            negative_free,
            bound,
        }
    }

    pub(crate) fn num_vars(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn constraints(&self) -> &'m [Cardinality] {
        self.constraints
    }

    #[inline]
    pub(crate) fn is_free(&self, var: usize) -> bool {
        self.values[var].is_none()
    }

    #[inline]
    pub(crate) fn coefficient(&self, var: usize) -> i64 {
        self.coefficients[var]
    }

    /// `(true, free)` counts of constraint `c`.
    #[inline]
    pub(crate) fn counts(&self, c: usize) -> (u32, u32) {
        (self.num_true[c], self.num_free[c])
    }

    pub(crate) fn constraints_of(&self, var: usize) -> &[u32] {
        &self.watches[var]
    }

    pub(crate) fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub(crate) fn cost(&self) -> i64 {
        self.cost
    }

    /// No completion of the current partial assignment costs less.
    pub(crate) fn lower_bound(&self) -> i64 {
        self.cost + self.negative_free + self.bound.total()
    }

    pub(crate) fn bound_groups(&self) -> usize {
        self.bound.group_count()
    }

    /// Checks every constraint once; used at the root.
    pub(crate) fn propagate_all(&mut self) -> Result<(), Conflict> {
        self.queue.extend(0..self.constraints.len());
        self.propagate()
    }

    /// Assigns `var` and propagates the consequences.
    pub(crate) fn decide(&mut self, var: usize, value: bool) -> Result<(), Conflict> {
        self.assign(var, value);
        self.propagate()
    }

    /// Undoes every assignment made after the trail had length `mark`.
    pub(crate) fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let Some(var) = self.trail.pop() else {
                break;
            };
            let was_true = self.values[var].take() == Some(true);
            let coefficient = self.coefficients[var];
            if coefficient < 0 {
                self.negative_free += coefficient;
            }
            if was_true {
                self.cost -= coefficient;
            }
            for &c in self.watches[var].iter() {
                let c = c as usize;
                self.num_free[c] += 1;
                if was_true {
                    self.num_true[c] -= 1;
                }
            }
            self.bound.refresh_var(
                var,
                self.constraints,
                &self.values,
                &self.num_true,
                &self.coefficients,
            );
        }
        self.queue.clear();
    }

    /// Current values with free variables read as false.
    pub(crate) fn solution(&self) -> Vec<bool> {
        self.values.iter().map(|v| v.unwrap_or(false)).collect()
    }

    fn assign(&mut self, var: usize, value: bool) {
        debug_assert!(self.values[var].is_none());
        self.values[var] = Some(value);
        self.trail.push(var);

        let coefficient = self.coefficients[var];
        if coefficient < 0 {
            self.negative_free -= coefficient;
        }
        if value {
            self.cost += coefficient;
        }
        for &c in self.watches[var].iter() {
            let c = c as usize;
            self.num_free[c] -= 1;
            if value {
                self.num_true[c] += 1;
            }
            self.queue.push(c);
        }
        self.bound.refresh_var(
            var,
            self.constraints,
            &self.values,
            &self.num_true,
            &self.coefficients,
        );
    }

    fn propagate(&mut self) -> Result<(), Conflict> {
        let constraints = self.constraints;
        while let Some(c) = self.queue.pop() {
            let constraint = &constraints[c];
            let (t, f) = (self.num_true[c], self.num_free[c]);
            if t > constraint.max || t + f < constraint.min {
                self.queue.clear();
                return Err(Conflict { constraint: c });
            }
            if f == 0 {
                continue;
            }
            let forced = if t == constraint.max {
                false
            } else if t + f == constraint.min {
                true
            } else {
                continue;
            };
            for var in &constraint.vars {
                if self.values[var.index()].is_none() {
                    self.assign(var.index(), forced);
                }
            }
        }
        Ok(())
    }
}
