//! Error types for DutyRoster

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for DutyRoster operations.
///
/// Scheduling outcomes (infeasible, timed out) are not errors; they are
/// reported through [`SchedulingResult`](crate::SchedulingResult). This type
/// covers inputs that must be rejected before any model is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DutyRosterError {
    /// The roster contains no active employees.
    #[error("No active employees found")]
    EmptyRoster,

    /// The horizon ends before it starts.
    #[error("Invalid scheduling horizon: end date {end} precedes start date {start}")]
    InvalidHorizon { start: NaiveDate, end: NaiveDate },

    /// A year outside the range representable by the calendar.
    #[error("Invalid scheduling year: {0}")]
    InvalidYear(i32),

    /// Too many preferred off dates requested by one employee.
    #[error("Too many preferred off dates. Maximum allowed: {max}")]
    TooManyPreferredOffDates { requested: usize, max: usize },

    /// Error in scheduling configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The model handed to a solver is malformed.
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl DutyRosterError {
    /// Returns true for errors raised before a model could be built.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, DutyRosterError::InvalidModel(_))
    }
}

/// Result type alias for DutyRoster operations
pub type Result<T> = std::result::Result<T, DutyRosterError>;
