//! Penalty objective over the shift grid.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use dutyroster_config::PenaltyConfig;
use dutyroster_core::{is_weekend, Employee, Horizon};

use crate::grid::ShiftGrid;
use crate::model::LinearObjective;

/// Derives per-(employee, day) penalties and collects them into a
/// [`LinearObjective`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dutyroster_config::PenaltyConfig;
/// use dutyroster_core::Employee;
/// use dutyroster_model::ObjectiveBuilder;
///
/// let christmas = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(); // Thursday
/// let penalties = PenaltyConfig::default();
/// let builder = ObjectiveBuilder::new(&penalties).with_holidays([christmas]);
///
/// let alice = Employee::new(1, "Alice")
///     .with_prior_year_shift_count(73)
///     .with_preferred_off_date(christmas);
///
/// assert_eq!(builder.penalty(&alice, christmas), 100 + 50 + 7);
/// ```
#[derive(Debug, Clone)]
pub struct ObjectiveBuilder<'a> {
    penalties: &'a PenaltyConfig,
    holidays: BTreeSet<NaiveDate>,
}

impl<'a> ObjectiveBuilder<'a> {
    pub fn new(penalties: &'a PenaltyConfig) -> Self {
        Self {
            penalties,
            holidays: BTreeSet::new(),
        }
    }

    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Cost of putting `employee` on duty on `date`.
    pub fn penalty(&self, employee: &Employee, date: NaiveDate) -> i64 {
        let mut penalty = 0;
        if employee.prefers_off(date) {
            penalty += self.penalties.preferred_off;
        }
        if self.is_holiday(date) {
            penalty += self.penalties.holiday;
        }
        if is_weekend(date) {
            penalty += self.penalties.weekend;
        }
        penalty + self.prior_load_bias(employee)
    }

    /// Standing per-day bias from last year's load.
    pub fn prior_load_bias(&self, employee: &Employee) -> i64 {
        match self.penalties.prior_load_divisor {
            0 => 0,
            divisor => i64::from(employee.prior_year_shift_count / divisor),
        }
    }

    /// Builds the objective in employee-major order, omitting
    /// non-positive terms.
    pub fn build(&self, employees: &[Employee], horizon: &Horizon, grid: &ShiftGrid) -> LinearObjective {
        let mut objective = LinearObjective::new();
        for (w, employee) in employees.iter().enumerate() {
            for (d, date) in horizon.days() {
                let penalty = self.penalty(employee, date);
                if penalty > 0 {
                    objective.add_term(grid.var(w, d), penalty);
                }
            }
        }
        objective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CpModel;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_without_history_is_free() {
        let penalties = PenaltyConfig::default();
        let builder = ObjectiveBuilder::new(&penalties);
        // Monday
        assert_eq!(builder.penalty(&Employee::new(1, "A"), date(2025, 1, 6)), 0);
    }

    #[test]
    fn test_penalties_stack() {
        let penalties = PenaltyConfig::default();
        // Saturday holiday
        let day = date(2025, 1, 4);
        let builder = ObjectiveBuilder::new(&penalties).with_holidays([day]);
        let employee = Employee::new(1, "A")
            .with_preferred_off_date(day)
            .with_prior_year_shift_count(29);
        assert_eq!(builder.penalty(&employee, day), 100 + 50 + 10 + 2);
    }

    #[test]
    fn test_zero_penalty_terms_are_omitted() {
        let penalties = PenaltyConfig::default();
        let builder = ObjectiveBuilder::new(&penalties);
        // Thursday to Sunday
        let horizon = Horizon::new(date(2025, 1, 2), date(2025, 1, 5)).unwrap();
        let employees = vec![
            Employee::new(1, "A"),
            Employee::new(2, "B").with_prior_year_shift_count(10),
        ];
        let mut model = CpModel::new("objective");
        let grid = ShiftGrid::new(&mut model, 2, 4);

        let objective = builder.build(&employees, &horizon, &grid);
        let terms: Vec<_> = objective.terms().iter().map(|(v, c)| (v.index(), *c)).collect();
        assert_eq!(
            terms,
            vec![(2, 10), (3, 10), (4, 1), (5, 1), (6, 11), (7, 11)]
        );
    }
}
