//! Solve orchestration.
//!
//! [`DutyScheduler`] is a pure function of its inputs: it builds a fresh
//! model per call, hands it to the backend with the configured budget and
//! turns the outcome into a [`SchedulingResult`]. Every failure is
//! value-returned; nothing here panics or performs I/O.

use chrono::NaiveDate;
use dutyroster_config::SchedulingConfig;
use dutyroster_core::{
    DutyRosterError, Employee, HardConstraint, Horizon, SchedulingResult, SolveStatus,
};
use dutyroster_model::DutyModelBuilder;
use tracing::{info, warn};

use crate::backend::{SearchLimits, SolverBackend};
use crate::diagnostics::{infeasible_report, status_report};
use crate::materialize::materialize;
use crate::search::BranchAndBoundSolver;

/// Builds, solves and interprets one duty model per call.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dutyroster_config::SchedulingConfig;
/// use dutyroster_core::Employee;
/// use dutyroster_solver::DutyScheduler;
///
/// let scheduler = DutyScheduler::from_config(SchedulingConfig::default().with_node_limit(10_000));
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
///
/// let result = scheduler.schedule(&[], start, end, &[], &[]);
/// assert!(!result.success);
/// assert_eq!(result.warnings, vec!["No active employees found".to_string()]);
/// assert_eq!(result.status, None);
/// ```
#[derive(Debug, Clone)]
pub struct DutyScheduler<B = BranchAndBoundSolver> {
    config: SchedulingConfig,
    backend: B,
}

impl DutyScheduler {
    /// Default configuration and the built-in backend.
    pub fn new() -> Self {
        Self::from_config(SchedulingConfig::default())
    }

    pub fn from_config(config: SchedulingConfig) -> Self {
        Self::with_backend(config, BranchAndBoundSolver::new())
    }
}

impl Default for DutyScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SolverBackend> DutyScheduler<B> {
    pub fn with_backend(config: SchedulingConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Schedules `[start, end]`, both inclusive.
    ///
    /// Inactive employees are skipped; the remaining roster order decides
    /// how the fairness remainder is distributed.
    pub fn schedule(
        &self,
        employees: &[Employee],
        start: NaiveDate,
        end: NaiveDate,
        constraints: &[HardConstraint],
        holidays: &[NaiveDate],
    ) -> SchedulingResult {
        match Horizon::new(start, end) {
            Ok(horizon) => self.schedule_horizon(employees, horizon, constraints, holidays),
            Err(err) => reject(err),
        }
    }

    pub fn schedule_horizon(
        &self,
        employees: &[Employee],
        horizon: Horizon,
        constraints: &[HardConstraint],
        holidays: &[NaiveDate],
    ) -> SchedulingResult {
        if let Err(err) = self.config.validate() {
            return reject(DutyRosterError::Configuration(err.to_string()));
        }

        let active: Vec<Employee> = employees.iter().filter(|e| e.active).cloned().collect();
        let duty = match DutyModelBuilder::new(&active, horizon)
            .with_constraints(constraints)
            .with_holidays(holidays)
            .with_policy(self.config.policy.clone())
            .with_penalties(self.config.penalties.clone())
            .build()
        {
            Ok(duty) => duty,
            Err(err) => return reject(err),
        };

        let limits = SearchLimits::from_config(&self.config.termination);
        info!(
            event = "solve_start",
            backend = self.backend.name(),
            start = %horizon.start(),
            end = %horizon.end(),
            employees = duty.num_employees(),
            days = duty.num_days(),
            time_limit_ms = limits.time_limit.map(|t| t.as_millis() as u64),
            node_limit = limits.node_limit,
        );

        let outcome = self.backend.solve(&duty.model, &limits);
        let statistics = &outcome.statistics;
        info!(
            event = "solve_end",
            status = %outcome.status,
            objective = outcome.objective,
            nodes = statistics.nodes,
            backtracks = statistics.backtracks,
            improvements = statistics.improvement_count(),
            duration_ms = statistics.elapsed.as_millis() as u64,
            speed = statistics.nodes_per_second(),
        );

        let mut warnings = duty.warnings.clone();
        match outcome.status {
            SolveStatus::Optimal | SolveStatus::Feasible
                if outcome.values.len() == duty.model.num_vars() =>
            {
                let objective = outcome
                    .objective
                    .unwrap_or_else(|| duty.model.objective_value(&outcome.values));
                let assignments = materialize(&duty, &outcome);
                info!(
                    event = "schedule_created",
                    status = %outcome.status,
                    assignments = assignments.len(),
                );
                SchedulingResult::solved(outcome.status, assignments, warnings, objective)
            }
            SolveStatus::Infeasible => {
                warn!(
                    event = "schedule_failed",
                    status = %outcome.status,
                    employees = duty.num_employees(),
                    days = duty.num_days(),
                    admin_constraints = duty.report.admin_constraints,
                );
                warnings.extend(infeasible_report(&duty, &self.config.policy));
                SchedulingResult::unsolved(outcome.status, warnings)
            }
            status => {
                warn!(event = "schedule_failed", status = %status);
                warnings.extend(status_report(status));
                SchedulingResult::unsolved(status, warnings)
            }
        }
    }
}

/// Schedules with the default configuration and the built-in backend.
pub fn schedule_duties(
    employees: &[Employee],
    start: NaiveDate,
    end: NaiveDate,
    constraints: &[HardConstraint],
    holidays: &[NaiveDate],
) -> SchedulingResult {
    DutyScheduler::new().schedule(employees, start, end, constraints, holidays)
}

fn reject(err: DutyRosterError) -> SchedulingResult {
    warn!(event = "schedule_rejected", error = %err);
    SchedulingResult::rejected(vec![err.to_string()])
}
