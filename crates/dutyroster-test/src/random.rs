//! Seeded random rosters.
//!
//! The same seed always yields the same roster, so generated inputs can be
//! used in determinism tests.

use chrono::NaiveDate;
use dutyroster_core::{Employee, HardConstraint, Horizon};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator for rosters and admin constraints.
pub struct RandomRoster {
    rng: ChaCha8Rng,
}

impl RandomRoster {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// `n` employees with prior-year loads in `0..max_prior` and up to
    /// `max_preferences` preferred off dates inside `horizon`.
    pub fn employees(
        &mut self,
        n: u64,
        horizon: &Horizon,
        max_prior: u32,
        max_preferences: usize,
    ) -> Vec<Employee> {
        (1..=n)
            .map(|id| {
                let prior = if max_prior == 0 {
                    0
                } else {
                    self.rng.random_range(0..max_prior)
                };
                let count = self.rng.random_range(0..=max_preferences);
                let dates: Vec<NaiveDate> = (0..count).map(|_| self.day(horizon)).collect();
                Employee::new(id, format!("Employee {}", id))
                    .with_prior_year_shift_count(prior)
                    .with_preferred_off_dates(dates)
            })
            .collect()
    }

    /// `count` admin constraints on random (employee, day) pairs.
    pub fn constraints(
        &mut self,
        employees: &[Employee],
        horizon: &Horizon,
        count: usize,
    ) -> Vec<HardConstraint> {
        if employees.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|_| {
                let employee = &employees[self.rng.random_range(0..employees.len())];
                let flexible = self.rng.random_bool(0.25);
                let constraint = HardConstraint::new(employee.id, self.day(horizon), "Random leave");
                if flexible {
                    constraint.flexible()
                } else {
                    constraint
                }
            })
            .collect()
    }

    fn day(&mut self, horizon: &Horizon) -> NaiveDate {
        let index = self.rng.random_range(0..horizon.num_days());
        horizon.date_of(index).unwrap_or(horizon.start())
    }
}
