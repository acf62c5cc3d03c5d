//! Calendar horizon and day-index mapping.
//!
//! A [`Horizon`] is an inclusive date range. Day index `d` maps to
//! `start + d` days; every other component addresses days by index.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use dutyroster_core::Horizon;
//!
//! let horizon = Horizon::for_year(2025).unwrap();
//! assert_eq!(horizon.num_days(), 365);
//!
//! let july_4 = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
//! assert_eq!(horizon.day_index(july_4), Some(184));
//! assert_eq!(horizon.date_of(184), Some(july_4));
//! ```

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::{DutyRosterError, Result};

/// Inclusive range of calendar days covered by one scheduling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Horizon {
    start: NaiveDate,
    end: NaiveDate,
}

impl Horizon {
    /// Creates a horizon from `start` to `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`DutyRosterError::InvalidHorizon`] if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(DutyRosterError::InvalidHorizon { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates the horizon January 1 to December 31 of `year`.
    pub fn for_year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(DutyRosterError::InvalidYear(year))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(DutyRosterError::InvalidYear(year))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the horizon: `daysBetween(start, end) + 1`.
    pub fn num_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Returns the date for day index `day`, or `None` past the end.
    pub fn date_of(&self, day: usize) -> Option<NaiveDate> {
        if day >= self.num_days() {
            return None;
        }
        self.start.checked_add_days(Days::new(day as u64))
    }

    /// Returns the day index of `date`, or `None` outside the horizon.
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        Some((date - self.start).num_days() as usize)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates `(day_index, date)` pairs in chronological order.
    pub fn days(&self) -> impl Iterator<Item = (usize, NaiveDate)> + '_ {
        self.start
            .iter_days()
            .take(self.num_days())
            .enumerate()
    }
}

/// Returns true if `date` falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
