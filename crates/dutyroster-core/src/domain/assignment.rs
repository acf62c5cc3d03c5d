//! Duty assignments produced by a successful solve.

use chrono::NaiveDate;

use super::EmployeeId;

/// One employee on duty for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
}

impl Assignment {
    pub fn new(employee_id: EmployeeId, date: NaiveDate) -> Self {
        Self {
            employee_id,
            date,
        }
    }
}
