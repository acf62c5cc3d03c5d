//! DutyRoster Model - Constraint model construction
//!
//! This crate turns roster inputs into a solver-ready model:
//! - [`CpModel`]: a generic boolean model of cardinality constraints and a
//!   linear objective, the only thing a solver backend ever sees
//! - [`ShiftGrid`]: the employee × day matrix of decision variables
//! - [`DutyModelBuilder`]: coverage, availability, fairness and
//!   anti-clustering constraints, in that order
//! - [`ObjectiveBuilder`]: preference, holiday, weekend and prior-load
//!   penalties

pub mod builder;
pub mod fairness;
pub mod grid;
pub mod model;
pub mod objective;

pub use builder::{BuildReport, DutyModel, DutyModelBuilder};
pub use fairness::{fairness_bands, FairnessBand, FairnessPlan};
pub use grid::ShiftGrid;
pub use model::{BoolVar, Cardinality, ConstraintKind, CpModel, LinearObjective};
pub use objective::ObjectiveBuilder;
