//! Duty model construction.
//!
//! [`DutyModelBuilder`] adds constraints in a fixed order: coverage,
//! availability, fairness, anti-clustering. The objective is built last by
//! [`ObjectiveBuilder`].

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use dutyroster_config::{PenaltyConfig, PolicyConfig};
use dutyroster_core::{DutyRosterError, Employee, EmployeeId, HardConstraint, Horizon, Result};
use tracing::{debug, info};

use crate::fairness::{fairness_bands, FairnessPlan};
use crate::grid::ShiftGrid;
use crate::model::{ConstraintKind, CpModel};
use crate::objective::ObjectiveBuilder;

/// Facts gathered while building, used for logging and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of admin constraints handed to the builder.
    pub admin_constraints: usize,
    /// Distinct (employee, day) pairs forced off.
    pub applied_constraints: usize,
    /// Admin constraints naming an unknown employee or an out-of-horizon date.
    pub ignored_constraints: usize,
    /// Even split and per-employee bands.
    pub fairness: FairnessPlan,
    /// Days on which every rostered employee is blocked.
    pub fully_blocked_days: Vec<NaiveDate>,
}

/// A built model together with the mapping back to the domain.
#[derive(Debug, Clone)]
pub struct DutyModel {
    pub model: CpModel,
    pub grid: ShiftGrid,
    pub horizon: Horizon,
    /// Roster order; index `w` of the grid is `employee_ids[w]`.
    pub employee_ids: Vec<EmployeeId>,
    /// Informational notices, such as prior-year imbalance.
    pub warnings: Vec<String>,
    pub report: BuildReport,
}

impl DutyModel {
    pub fn num_employees(&self) -> usize {
        self.grid.num_employees()
    }

    pub fn num_days(&self) -> usize {
        self.grid.num_days()
    }
}

/// Builder for [`DutyModel`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dutyroster_core::{Employee, Horizon};
/// use dutyroster_model::{ConstraintKind, DutyModelBuilder};
///
/// let employees = vec![Employee::new(1, "Alice"), Employee::new(2, "Bob")];
/// let horizon = Horizon::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
/// ).unwrap();
///
/// let duty = DutyModelBuilder::new(&employees, horizon).build().unwrap();
/// assert_eq!(duty.model.num_vars(), 20);
/// assert_eq!(duty.model.constraint_count_of(ConstraintKind::Coverage), 10);
/// ```
#[derive(Debug, Clone)]
pub struct DutyModelBuilder<'a> {
    employees: &'a [Employee],
    horizon: Horizon,
    constraints: &'a [HardConstraint],
    holidays: Vec<NaiveDate>,
    policy: PolicyConfig,
    penalties: PenaltyConfig,
}

impl<'a> DutyModelBuilder<'a> {
    /// Creates a builder over `employees` in roster order.
    pub fn new(employees: &'a [Employee], horizon: Horizon) -> Self {
        Self {
            employees,
            horizon,
            constraints: &[],
            holidays: Vec::new(),
            policy: PolicyConfig::default(),
            penalties: PenaltyConfig::default(),
        }
    }

    pub fn with_constraints(mut self, constraints: &'a [HardConstraint]) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_holidays(mut self, holidays: &[NaiveDate]) -> Self {
        self.holidays = holidays.to_vec();
        self
    }

    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_penalties(mut self, penalties: PenaltyConfig) -> Self {
        self.penalties = penalties;
        self
    }

    /// Builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`DutyRosterError::EmptyRoster`] when there are no employees.
    pub fn build(self) -> Result<DutyModel> {
        let num_employees = self.employees.len();
        if num_employees == 0 {
            return Err(DutyRosterError::EmptyRoster);
        }
        let num_days = self.horizon.num_days();

        let mut model = CpModel::new(format!(
            "duty_{}_{}",
            self.horizon.start(),
            self.horizon.end()
        ));
        let grid = ShiftGrid::new(&mut model, num_employees, num_days);
        let mut warnings = Vec::new();

        self.add_coverage(&mut model, &grid);
        let (applied, ignored, fully_blocked_days) = self.add_availability(&mut model, &grid);
        let fairness = self.add_fairness(&mut model, &grid, &mut warnings);
        self.add_anti_clustering(&mut model, &grid);

        let objective = ObjectiveBuilder::new(&self.penalties)
            .with_holidays(self.holidays.iter().copied())
            .build(self.employees, &self.horizon, &grid);
        let objective_terms = objective.terms().len();
        model.minimize(objective);

        info!(
            event = "model_built",
            employees = num_employees,
            days = num_days,
            variables = model.num_vars(),
            constraints = model.constraint_count(),
            objective_terms = objective_terms,
            admin_constraints_applied = applied,
            admin_constraints_ignored = ignored,
        );

        Ok(DutyModel {
            model,
            grid,
            horizon: self.horizon,
            employee_ids: self.employees.iter().map(|e| e.id).collect(),
            warnings,
            report: BuildReport {
                admin_constraints: self.constraints.len(),
                applied_constraints: applied,
                ignored_constraints: ignored,
                fairness,
                fully_blocked_days,
            },
        })
    }

    fn add_coverage(&self, model: &mut CpModel, grid: &ShiftGrid) {
        for (d, date) in self.horizon.days() {
            model.add_exactly_one(
                ConstraintKind::Coverage,
                format!("coverage {}", date),
                grid.day_vars(d),
            );
        }
    }

    /// Returns (applied, ignored, fully blocked days).
    fn add_availability(
        &self,
        model: &mut CpModel,
        grid: &ShiftGrid,
    ) -> (usize, usize, Vec<NaiveDate>) {
        // First occurrence wins for duplicate ids.
        let mut index_of: HashMap<EmployeeId, usize> = HashMap::new();
        for (w, employee) in self.employees.iter().enumerate() {
            index_of.entry(employee.id).or_insert(w);
        }

        let mut blocked = BTreeSet::new();
        let mut ignored = 0;
        for constraint in self.constraints {
            let target = index_of
                .get(&constraint.employee_id)
                .copied()
                .zip(self.horizon.day_index(constraint.date));
            let Some((w, d)) = target else {
                ignored += 1;
                debug!(
                    event = "admin_constraint_ignored",
                    employee_id = %constraint.employee_id,
                    date = %constraint.date,
                    reason = %constraint.reason,
                );
                continue;
            };
            if !blocked.insert((w, d)) {
                continue;
            }
            debug!(
                event = "admin_constraint_applied",
                employee_id = %constraint.employee_id,
                date = %constraint.date,
                reason = %constraint.reason,
                flexible = constraint.flexible,
            );
            model.add_fixed_false(
                ConstraintKind::Availability,
                format!(
                    "{} (employee {} off {})",
                    constraint.reason, constraint.employee_id, constraint.date
                ),
                grid.var(w, d),
            );
        }

        let mut per_day = vec![0usize; grid.num_days()];
        for &(_, d) in &blocked {
            per_day[d] += 1;
        }
        let fully_blocked_days = per_day
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == grid.num_employees())
            .filter_map(|(d, _)| self.horizon.date_of(d))
            .collect();

        (blocked.len(), ignored, fully_blocked_days)
    }

    fn add_fairness(
        &self,
        model: &mut CpModel,
        grid: &ShiftGrid,
        warnings: &mut Vec<String>,
    ) -> FairnessPlan {
        let plan = fairness_bands(grid.num_days(), grid.num_employees(), &self.policy);
        let threshold = f64::from(plan.base) * self.policy.imbalance_factor;

        for (w, (employee, band)) in self.employees.iter().zip(&plan.bands).enumerate() {
            model.add_linear_range(
                ConstraintKind::Fairness,
                format!("fairness {}", employee.id),
                grid.employee_vars(w).to_vec(),
                band.min,
                band.max,
            );

            if f64::from(employee.prior_year_shift_count) > threshold {
                warnings.push(format!(
                    "Employee {} worked significantly more shifts last year ({}). Will try to balance assignments.",
                    employee.name, employee.prior_year_shift_count
                ));
            }
        }
        plan
    }

    fn add_anti_clustering(&self, model: &mut CpModel, grid: &ShiftGrid) {
        let window = self.policy.window_len();
        if window < 2 || grid.num_days() < window {
            return;
        }
        for (w, employee) in self.employees.iter().enumerate() {
            let vars = grid.employee_vars(w);
            for (start, span) in vars.windows(window).enumerate() {
                model.add_at_most_one(
                    ConstraintKind::AntiClustering,
                    format!("anti-clustering {} from day {}", employee.id, start),
                    span.to_vec(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests;
