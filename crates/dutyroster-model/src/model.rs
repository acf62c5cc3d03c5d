//! Generic boolean constraint model.
//!
//! Every constraint is a cardinality constraint `min <= Σ vars <= max`:
//!
//! | Helper | Bounds |
//! |---|---|
//! | [`CpModel::add_exactly_one`] | `[1, 1]` |
//! | [`CpModel::add_at_most_one`] | `[0, 1]` |
//! | [`CpModel::add_fixed_false`] | `[0, 0]` over one variable |
//! | [`CpModel::add_linear_range`] | `[lo, hi]` |
//!
//! The objective is a linear sum of integer coefficients, minimized.
//!
//! # Example
//!
//! ```
//! use dutyroster_model::{ConstraintKind, CpModel, LinearObjective};
//!
//! let mut model = CpModel::new("toy");
//! let a = model.new_bool_var("a");
//! let b = model.new_bool_var("b");
//! model.add_exactly_one(ConstraintKind::Coverage, "day 0", vec![a, b]);
//! model.add_fixed_false(ConstraintKind::Availability, "a is away", a);
//!
//! let mut objective = LinearObjective::new();
//! objective.add_term(b, 3);
//! model.minimize(objective);
//!
//! assert!(model.validate().is_ok());
//! assert!(model.is_satisfied_by(&[false, true]));
//! assert!(!model.is_satisfied_by(&[true, false]));
//! assert_eq!(model.objective_value(&[false, true]), 3);
//! ```

use std::collections::HashSet;
use std::fmt;

use dutyroster_core::{DutyRosterError, Result};

/// Handle to a boolean decision variable of a [`CpModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoolVar(usize);

impl BoolVar {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Which scheduling rule a constraint encodes.
///
/// Solvers ignore the kind; it exists for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Exactly one employee on duty per day.
    Coverage,
    /// Admin constraint forcing an employee off a day.
    Availability,
    /// Per-employee bounds on total duty days.
    Fairness,
    /// At most one duty per sliding window.
    AntiClustering,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Coverage => write!(f, "Coverage"),
            ConstraintKind::Availability => write!(f, "Availability"),
            ConstraintKind::Fairness => write!(f, "Fairness"),
            ConstraintKind::AntiClustering => write!(f, "AntiClustering"),
        }
    }
}

/// `min <= Σ vars <= max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cardinality {
    pub kind: ConstraintKind,
    pub label: String,
    pub vars: Vec<BoolVar>,
    pub min: u32,
    pub max: u32,
}

impl Cardinality {
    /// Returns true if `values` puts the number of true variables in range.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        let count = self.vars.iter().filter(|v| values[v.index()]).count() as u32;
        self.min <= count && count <= self.max
    }
}

/// Linear objective `Σ coefficient · var`, minimized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearObjective {
    terms: Vec<(BoolVar, i64)>,
}

impl LinearObjective {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term(&mut self, var: BoolVar, coefficient: i64) {
        self.terms.push((var, coefficient));
    }

    pub fn terms(&self) -> &[(BoolVar, i64)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Dense coefficient vector; repeated terms on one variable are summed.
    pub fn coefficients(&self, num_vars: usize) -> Vec<i64> {
        let mut coefficients = vec![0; num_vars];
        for &(var, coefficient) in &self.terms {
            coefficients[var.index()] += coefficient;
        }
        coefficients
    }

    pub fn evaluate(&self, values: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|(var, _)| values[var.index()])
            .map(|(_, coefficient)| coefficient)
            .sum()
    }
}

/// A boolean model: variables, cardinality constraints and an objective.
#[derive(Debug, Clone, Default)]
pub struct CpModel {
    name: String,
    var_names: Vec<String>,
    constraints: Vec<Cardinality>,
    objective: LinearObjective,
}

impl CpModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        self.var_names.push(name.into());
        BoolVar(self.var_names.len() - 1)
    }

    pub fn num_vars(&self) -> usize {
        self.var_names.len()
    }

    pub fn var_name(&self, var: BoolVar) -> Option<&str> {
        self.var_names.get(var.index()).map(String::as_str)
    }

    pub fn add_cardinality(
        &mut self,
        kind: ConstraintKind,
        label: impl Into<String>,
        vars: Vec<BoolVar>,
        min: u32,
        max: u32,
    ) {
        self.constraints.push(Cardinality {
            kind,
            label: label.into(),
            vars,
            min,
            max,
        });
    }

    pub fn add_exactly_one(&mut self, kind: ConstraintKind, label: impl Into<String>, vars: Vec<BoolVar>) {
        self.add_cardinality(kind, label, vars, 1, 1);
    }

    pub fn add_at_most_one(&mut self, kind: ConstraintKind, label: impl Into<String>, vars: Vec<BoolVar>) {
        self.add_cardinality(kind, label, vars, 0, 1);
    }

    pub fn add_fixed_false(&mut self, kind: ConstraintKind, label: impl Into<String>, var: BoolVar) {
        self.add_cardinality(kind, label, vec![var], 0, 0);
    }

    pub fn add_linear_range(
        &mut self,
        kind: ConstraintKind,
        label: impl Into<String>,
        vars: Vec<BoolVar>,
        min: u32,
        max: u32,
    ) {
        self.add_cardinality(kind, label, vars, min, max);
    }

    pub fn minimize(&mut self, objective: LinearObjective) {
        self.objective = objective;
    }

    pub fn constraints(&self) -> &[Cardinality] {
        &self.constraints
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraint_count_of(&self, kind: ConstraintKind) -> usize {
        self.constraints.iter().filter(|c| c.kind == kind).count()
    }

    pub fn objective(&self) -> &LinearObjective {
        &self.objective
    }

    /// Rejects dangling or repeated variables and empty ranges.
    pub fn validate(&self) -> Result<()> {
        let num_vars = self.num_vars();
        for constraint in &self.constraints {
            if constraint.min > constraint.max {
                return Err(DutyRosterError::InvalidModel(format!(
                    "constraint '{}' has min {} above max {}",
                    constraint.label, constraint.min, constraint.max
                )));
            }
            if let Some(var) = constraint.vars.iter().find(|v| v.index() >= num_vars) {
                return Err(DutyRosterError::InvalidModel(format!(
                    "constraint '{}' references unknown variable {}",
                    constraint.label,
                    var.index()
                )));
            }
            let mut seen = HashSet::with_capacity(constraint.vars.len());
            if let Some(var) = constraint.vars.iter().find(|v| !seen.insert(**v)) {
                return Err(DutyRosterError::InvalidModel(format!(
                    "constraint '{}' lists variable {} twice",
                    constraint.label,
                    var.index()
                )));
            }
        }
        if let Some((var, _)) = self.objective.terms().iter().find(|(v, _)| v.index() >= num_vars) {
            return Err(DutyRosterError::InvalidModel(format!(
                "objective references unknown variable {}",
                var.index()
            )));
        }
        Ok(())
    }

    /// Returns true if `values` satisfies every constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        values.len() == self.num_vars() && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }

    pub fn objective_value(&self, values: &[bool]) -> i64 {
        self.objective.evaluate(values)
    }
}
