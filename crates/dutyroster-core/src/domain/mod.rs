//! Domain types for duty scheduling.
//!
//! All inputs are read-only for the duration of a scheduling run. The only
//! output type is [`SchedulingResult`], created once per invocation.

mod assignment;
mod constraint;
mod employee;
mod result;
mod status;

pub use assignment::Assignment;
pub use constraint::HardConstraint;
pub use employee::{Employee, EmployeeId};
pub use result::SchedulingResult;
pub use status::SolveStatus;

#[cfg(test)]
mod tests;
