//! DutyRoster - yearly on-duty rosters
//!
//! Assigns exactly one on-duty employee to every day of a year. Admin
//! constraints are hard; preferences, weekends, holidays and last year's
//! load are weighed in the objective.
//!
//! # Example
//!
//! ```rust
//! use dutyroster::prelude::*;
//!
//! let employees: Vec<_> = (1..=6).map(|i| Employee::new(i, format!("Employee {}", i))).collect();
//! let config = SchedulingConfig::default().with_node_limit(2_000);
//!
//! let scheduler = YearlyScheduler::from_config(config);
//! let result = scheduler.schedule_year(2025, &employees, &[]);
//!
//! assert!(result.success);
//! assert_eq!(result.assignments.len(), 365);
//! ```

pub use dutyroster_config::{
    ConfigError, PenaltyConfig, PolicyConfig, PreferenceConfig, SchedulingConfig,
    TerminationConfig,
};
pub use dutyroster_core::{
    is_weekend, Assignment, DutyRosterError, Employee, EmployeeId, HardConstraint, Horizon,
    Result, SchedulingResult, SolveStatus,
};
pub use dutyroster_model::{DutyModel, DutyModelBuilder};
pub use dutyroster_solver::{
    schedule_duties, BranchAndBoundSolver, DutyScheduler, SearchLimits, SearchStatistics,
    SolveOutcome, SolverBackend,
};

pub mod workflow;
pub use workflow::{
    recompute_prior_year_counts, refresh_prior_year_counts, replace_year, shifts_for_employee,
    shifts_for_year, YearlyScheduler,
};

#[cfg(feature = "console")]
pub mod console;

/// Lower-level building blocks: the generic model and the search backend.
pub mod model {
    pub use dutyroster_model::{
        fairness_bands, BoolVar, BuildReport, Cardinality, ConstraintKind, CpModel, FairnessBand,
        FairnessPlan, LinearObjective, ObjectiveBuilder, ShiftGrid,
    };
    pub use dutyroster_solver::{diagnostics, materialize, termination};
}

pub mod prelude {
    pub use super::{
        schedule_duties, Assignment, DutyScheduler, Employee, EmployeeId, HardConstraint,
        SchedulingConfig, SchedulingResult, SolveStatus, YearlyScheduler,
    };
}
