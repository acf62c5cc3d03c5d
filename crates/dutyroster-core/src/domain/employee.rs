//! Employee roster entries.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

/// Stable identity of an employee across scheduling runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EmployeeId {
    fn from(id: u64) -> Self {
        EmployeeId(id)
    }
}

/// An employee that can be put on duty.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dutyroster_core::Employee;
///
/// let alice = Employee::new(1, "Alice")
///     .with_prior_year_shift_count(80)
///     .with_preferred_off_date(NaiveDate::from_ymd_opt(2025, 12, 24).unwrap());
///
/// assert!(alice.active);
/// assert!(alice.prefers_off(NaiveDate::from_ymd_opt(2025, 12, 24).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub active: bool,
    /// Number of duty days assigned in the previous year.
    pub prior_year_shift_count: u32,
    /// Dates the employee would rather not be on duty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferred_off_dates: BTreeSet<NaiveDate>,
}

impl Employee {
    /// Creates an active employee with no history and no preferences.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: EmployeeId(id),
            name: name.into(),
            active: true,
            prior_year_shift_count: 0,
            preferred_off_dates: BTreeSet::new(),
        }
    }

    pub fn with_prior_year_shift_count(mut self, count: u32) -> Self {
        self.prior_year_shift_count = count;
        self
    }

    pub fn with_preferred_off_date(mut self, date: NaiveDate) -> Self {
        self.preferred_off_dates.insert(date);
        self
    }

    pub fn with_preferred_off_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.preferred_off_dates.extend(dates);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn prefers_off(&self, date: NaiveDate) -> bool {
        self.preferred_off_dates.contains(&date)
    }
}
