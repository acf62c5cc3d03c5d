//! Yearly scheduling workflow.
//!
//! Glue between a persisted roster and the scheduler: pick the active
//! employees, scope admin constraints and holidays to the year, run the
//! solve, and help the caller refresh prior-year counts afterwards. All
//! functions are pure; persistence and notifications stay with the caller.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use dutyroster_config::SchedulingConfig;
use dutyroster_core::{
    Assignment, DutyRosterError, Employee, EmployeeId, HardConstraint, Horizon, Result,
    SchedulingResult,
};
use dutyroster_solver::{BranchAndBoundSolver, DutyScheduler, SolverBackend};
use tracing::{info, warn};

/// Schedules whole calendar years.
#[derive(Debug, Clone)]
pub struct YearlyScheduler<B = BranchAndBoundSolver> {
    scheduler: DutyScheduler<B>,
}

impl YearlyScheduler {
    pub fn new() -> Self {
        Self::from_config(SchedulingConfig::default())
    }

    pub fn from_config(config: SchedulingConfig) -> Self {
        Self {
            scheduler: DutyScheduler::from_config(config),
        }
    }
}

impl Default for YearlyScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SolverBackend> YearlyScheduler<B> {
    pub fn with_backend(config: SchedulingConfig, backend: B) -> Self {
        Self {
            scheduler: DutyScheduler::with_backend(config, backend),
        }
    }

    pub fn config(&self) -> &SchedulingConfig {
        self.scheduler.config()
    }

    /// Schedules January 1 to December 31 of `year`.
    ///
    /// Inactive employees are dropped with roster order preserved; admin
    /// constraints and configured holidays outside the year are dropped.
    pub fn schedule_year(
        &self,
        year: i32,
        employees: &[Employee],
        constraints: &[HardConstraint],
    ) -> SchedulingResult {
        let horizon = match Horizon::for_year(year) {
            Ok(horizon) => horizon,
            Err(err) => {
                warn!(event = "schedule_rejected", year = year, error = %err);
                return SchedulingResult::rejected(vec![err.to_string()]);
            }
        };

        let in_year: Vec<HardConstraint> = constraints
            .iter()
            .filter(|c| c.date.year() == year)
            .cloned()
            .collect();
        let holidays: Vec<NaiveDate> = self
            .config()
            .holidays
            .iter()
            .copied()
            .filter(|d| d.year() == year)
            .collect();

        info!(
            event = "schedule_year",
            year = year,
            employees = employees.iter().filter(|e| e.active).count(),
            admin_constraints = in_year.len(),
            holidays = holidays.len(),
        );
        self.scheduler
            .schedule_horizon(employees, horizon, &in_year, &holidays)
    }

    /// Checks a request of preferred off dates against the configured limit.
    ///
    /// Repeated dates count once.
    pub fn validate_preferred_off_dates(&self, dates: &[NaiveDate]) -> Result<()> {
        let requested = dates.iter().collect::<BTreeSet<_>>().len();
        let max = self.config().preferences.max_preferred_off_days;
        if requested > max {
            return Err(DutyRosterError::TooManyPreferredOffDates { requested, max });
        }
        Ok(())
    }

    /// Replaces `employee`'s preferred off dates in `year` with `dates`.
    ///
    /// Dates in other years are kept. `dates` outside `year` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DutyRosterError::TooManyPreferredOffDates`] and leaves the
    /// employee unchanged when the request exceeds the limit.
    pub fn set_preferred_off_dates(
        &self,
        employee: &mut Employee,
        year: i32,
        dates: &[NaiveDate],
    ) -> Result<()> {
        let in_year: Vec<NaiveDate> = dates.iter().copied().filter(|d| d.year() == year).collect();
        self.validate_preferred_off_dates(&in_year)?;
        employee.preferred_off_dates.retain(|d| d.year() != year);
        employee.preferred_off_dates.extend(in_year);
        Ok(())
    }
}

/// Assignments per employee within `year`.
pub fn recompute_prior_year_counts(assignments: &[Assignment], year: i32) -> BTreeMap<EmployeeId, u32> {
    let mut counts = BTreeMap::new();
    for assignment in assignments.iter().filter(|a| a.date.year() == year) {
        *counts.entry(assignment.employee_id).or_insert(0) += 1;
    }
    counts
}

/// Sets every employee's prior-year count from `assignments` in `year`;
/// employees without assignments get zero.
pub fn refresh_prior_year_counts(employees: &mut [Employee], assignments: &[Assignment], year: i32) {
    let counts = recompute_prior_year_counts(assignments, year);
    for employee in employees {
        employee.prior_year_shift_count = counts.get(&employee.id).copied().unwrap_or(0);
    }
}

/// Assignments within `year`, in chronological order.
pub fn shifts_for_year(assignments: &[Assignment], year: i32) -> Vec<Assignment> {
    let mut shifts: Vec<Assignment> = assignments
        .iter()
        .filter(|a| a.date.year() == year)
        .copied()
        .collect();
    shifts.sort_by_key(|a| (a.date, a.employee_id));
    shifts
}

/// One employee's assignments within `year`, in chronological order.
pub fn shifts_for_employee(assignments: &[Assignment], employee: EmployeeId, year: i32) -> Vec<Assignment> {
    let mut shifts = shifts_for_year(assignments, year);
    shifts.retain(|a| a.employee_id == employee);
    shifts
}

/// Swaps every stored assignment in `year` for `replacement`.
///
/// Returns the number of assignments removed.
pub fn replace_year(roster: &mut Vec<Assignment>, year: i32, replacement: &[Assignment]) -> usize {
    let before = roster.len();
    roster.retain(|a| a.date.year() != year);
    let removed = before - roster.len();
    roster.extend_from_slice(replacement);
    roster.sort_by_key(|a| (a.date, a.employee_id));
    removed
}
