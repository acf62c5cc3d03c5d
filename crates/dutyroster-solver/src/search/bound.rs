//! Incremental lower bound on the objective.
//!
//! A set of pairwise disjoint demand constraints (`min > 0`) is fixed at
//! the root. Each still needs `min - true` more variables set, and since
//! no variable is shared, the cheapest completions of these constraints
//! can be summed. Negative coefficients of free variables are added on
//! top, so the bound stays valid for any objective.

use dutyroster_model::Cardinality;

#[derive(Debug)]
pub(crate) struct LowerBound {
    /// Variable -> group.
    group_of: Vec<Option<u32>>,
    /// Group -> constraint index.
    groups: Vec<usize>,
    contribution: Vec<i64>,
    total: i64,
    scratch: Vec<i64>,
}

impl LowerBound {
    /// Greedily picks disjoint demand constraints in index order.
    pub(crate) fn new(constraints: &[Cardinality], num_vars: usize) -> Self {
        let mut group_of = vec![None; num_vars];
        let mut groups = Vec::new();
        for (c, constraint) in constraints.iter().enumerate() {
            if constraint.min == 0 || constraint.vars.iter().any(|v| group_of[v.index()].is_some()) {
                continue;
            }
            let group = groups.len() as u32;
            for var in &constraint.vars {
                group_of[var.index()] = Some(group);
            }
            groups.push(c);
        }
        let contribution = vec![0; groups.len()];
        Self {
            group_of,
            groups,
            contribution,
            total: 0,
            scratch: Vec::new(),
        }
    }

    pub(crate) fn total(&self) -> i64 {
        self.total
    }

    pub(crate) fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub(crate) fn refresh_all(
        &mut self,
        constraints: &[Cardinality],
        values: &[Option<bool>],
        num_true: &[u32],
        coefficients: &[i64],
    ) {
        for group in 0..self.groups.len() {
            self.refresh_group(group, constraints, values, num_true, coefficients);
        }
    }

    /// Recomputes the group containing `var`, if any.
    pub(crate) fn refresh_var(
        &mut self,
        var: usize,
        constraints: &[Cardinality],
        values: &[Option<bool>],
        num_true: &[u32],
        coefficients: &[i64],
    ) {
        if let Some(group) = self.group_of[var] {
            self.refresh_group(group as usize, constraints, values, num_true, coefficients);
        }
    }

    fn refresh_group(
        &mut self,
        group: usize,
        constraints: &[Cardinality],
        values: &[Option<bool>],
        num_true: &[u32],
        coefficients: &[i64],
    ) {
        let c = self.groups[group];
        let constraint = &constraints[c];
        let need = constraint.min.saturating_sub(num_true[c]) as usize;

        let value = if need == 0 {
            0
        } else {
            self.scratch.clear();
            self.scratch.extend(
                constraint
                    .vars
                    .iter()
                    .filter(|v| values[v.index()].is_none())
                    .map(|v| coefficients[v.index()].max(0)),
            );
            if need == 1 {
                self.scratch.iter().copied().min().unwrap_or(0)
            } else {
                self.scratch.sort_unstable();
                self.scratch.iter().take(need).sum()
            }
        };

        self.total += value - self.contribution[group];
        self.contribution[group] = value;
    }
}
