//! Admin-imposed unavailability.

use chrono::NaiveDate;

use super::EmployeeId;

/// A date on which the named employee must not be on duty.
///
/// The `flexible` flag is informational; flexible constraints are enforced
/// exactly like rigid ones.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardConstraint {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub reason: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flexible: bool,
}

impl HardConstraint {
    pub fn new(employee_id: EmployeeId, date: NaiveDate, reason: impl Into<String>) -> Self {
        Self {
            employee_id,
            date,
            reason: reason.into(),
            flexible: false,
        }
    }

    pub fn flexible(mut self) -> Self {
        self.flexible = true;
        self
    }
}
