//! Solver output to duty assignments.

use dutyroster_core::Assignment;
use dutyroster_model::DutyModel;

use crate::backend::SolveOutcome;

/// Reads the grid day-major, then in roster order, emitting one
/// [`Assignment`] per true variable.
///
/// On a feasible outcome coverage guarantees exactly one assignment per
/// day, so the result is in chronological order without sorting.
pub fn materialize(duty: &DutyModel, outcome: &SolveOutcome) -> Vec<Assignment> {
    let mut assignments = Vec::with_capacity(duty.num_days());
    for (d, date) in duty.horizon.days() {
        for (w, &employee_id) in duty.employee_ids.iter().enumerate() {
            if outcome.value_of(duty.grid.var(w, d)) {
                assignments.push(Assignment::new(employee_id, date));
            }
        }
    }
    assignments
}
