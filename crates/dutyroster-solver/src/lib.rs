//! DutyRoster Solver - Solve orchestration
//!
//! This crate runs a built duty model to completion:
//! - [`SolverBackend`]: the solver collaborator seam; any backend that
//!   accepts a [`CpModel`](dutyroster_model::CpModel) can be plugged in
//! - [`BranchAndBoundSolver`]: the built-in backend; a construction
//!   heuristic and hill climbing seed the incumbent, then a deterministic
//!   depth-first branch-and-bound over cardinality constraints improves it
//! - [`termination`]: time and node budgets
//! - [`DutyScheduler`]: builds the model, solves it, and turns the outcome
//!   into a [`SchedulingResult`](dutyroster_core::SchedulingResult)
//!
//! # Example
//!
//! ```
//! use dutyroster_core::Employee;
//! use dutyroster_solver::DutyScheduler;
//! use chrono::NaiveDate;
//!
//! let employees: Vec<_> = (1..=4).map(|i| Employee::new(i, format!("E{}", i))).collect();
//! let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
//!
//! let result = DutyScheduler::new().schedule(&employees, start, end, &[], &[]);
//! assert!(result.success);
//! assert_eq!(result.assignments.len(), 7);
//! ```

pub mod backend;
pub mod diagnostics;
pub mod materialize;
pub mod orchestrator;
pub mod scope;
pub mod search;
pub mod statistics;
pub mod termination;

pub use backend::{SearchLimits, SolveOutcome, SolverBackend};
pub use materialize::materialize;
pub use orchestrator::{schedule_duties, DutyScheduler};
pub use search::BranchAndBoundSolver;
pub use statistics::{Improvement, SearchStatistics};
