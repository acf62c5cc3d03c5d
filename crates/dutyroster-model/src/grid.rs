//! Employee × day matrix of decision variables.

use crate::model::{BoolVar, CpModel};

/// `W × D` boolean variables: "employee `w` is on duty on day `d`".
///
/// Variables are created employee-major, so `var(w, d)` has model index
/// `w * D + d`.
#[derive(Debug, Clone)]
pub struct ShiftGrid {
    num_employees: usize,
    num_days: usize,
    vars: Vec<BoolVar>,
}

impl ShiftGrid {
    /// Creates the variables in `model`, named `shifts_<w>_<d>`.
    pub fn new(model: &mut CpModel, num_employees: usize, num_days: usize) -> Self {
        let mut vars = Vec::with_capacity(num_employees * num_days);
        for w in 0..num_employees {
            for d in 0..num_days {
                vars.push(model.new_bool_var(format!("shifts_{}_{}", w, d)));
            }
        }
        Self {
            num_employees,
            num_days,
            vars,
        }
    }

    pub fn num_employees(&self) -> usize {
        self.num_employees
    }

    pub fn num_days(&self) -> usize {
        self.num_days
    }

    #[inline]
    pub fn var(&self, employee: usize, day: usize) -> BoolVar {
        debug_assert!(employee < self.num_employees && day < self.num_days);
        self.vars[employee * self.num_days + day]
    }

    /// All day variables of one employee, in day order.
    pub fn employee_vars(&self, employee: usize) -> &[BoolVar] {
        let start = employee * self.num_days;
        &self.vars[start..start + self.num_days]
    }

    /// All employee variables of one day, in roster order.
    pub fn day_vars(&self, day: usize) -> Vec<BoolVar> {
        (0..self.num_employees).map(|w| self.var(w, day)).collect()
    }
}
