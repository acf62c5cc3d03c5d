//! DutyRoster Core - Domain types for yearly duty scheduling
//!
//! This crate provides the vocabulary shared by every other DutyRoster crate:
//! - Domain types: employees, admin constraints, assignments, results
//! - The calendar horizon that maps dates to zero-based day indices
//! - The error taxonomy for configuration failures

pub mod calendar;
pub mod domain;
pub mod error;

pub use calendar::{is_weekend, Horizon};
pub use domain::{Assignment, Employee, EmployeeId, HardConstraint, SchedulingResult, SolveStatus};
pub use error::{DutyRosterError, Result};
