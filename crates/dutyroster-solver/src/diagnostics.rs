//! Operator-facing explanations of failed solves.
//!
//! The text is advisory only; nothing retries or relaxes the model based
//! on it.

use dutyroster_config::PolicyConfig;
use dutyroster_core::SolveStatus;
use dutyroster_model::DutyModel;

/// Warnings for an infeasible model: headline, restated counts, generic
/// causes and suggestions, then any structural hints found at build time.
///
/// # Examples
///
/// ```
/// use dutyroster_config::PolicyConfig;
/// use dutyroster_core::{Employee, Horizon};
/// use dutyroster_model::DutyModelBuilder;
/// use dutyroster_solver::diagnostics::infeasible_report;
///
/// let employees = vec![Employee::new(1, "Solo")];
/// let duty = DutyModelBuilder::new(&employees, Horizon::for_year(2025).unwrap())
///     .build()
///     .unwrap();
///
/// let report = infeasible_report(&duty, &PolicyConfig::default());
/// assert_eq!(report[0], "Schedule creation failed: problem is INFEASIBLE");
/// assert_eq!(report[2], "Average shifts per employee: 365.00");
/// ```
pub fn infeasible_report(duty: &DutyModel, policy: &PolicyConfig) -> Vec<String> {
    let employees = duty.num_employees();
    let days = duty.num_days();

    let mut warnings = vec![
        format!("Schedule creation failed: problem is {}", SolveStatus::Infeasible),
        format!(
            "Employees: {}, days: {}, admin constraints: {}",
            employees, days, duty.report.admin_constraints
        ),
        format!(
            "Average shifts per employee: {:.2}",
            days as f64 / employees as f64
        ),
        "Possible causes:".to_string(),
        "- Too many admin constraints (hard constraints cannot be satisfied)".to_string(),
        "- Not enough employees for the workload".to_string(),
        "- Fairness constraints too strict".to_string(),
        "Suggestions:".to_string(),
        "- Review admin constraints for conflicts".to_string(),
        "- Consider adding more employees".to_string(),
        "- Relax fairness requirements".to_string(),
    ];

    for day in &duty.report.fully_blocked_days {
        warnings.push(format!("Every employee is blocked by admin constraints on {}", day));
    }

    let window = policy.window_len();
    if window >= 2 && employees < window && days >= window {
        warnings.push(format!(
            "{} employees cannot cover {} consecutive days when nobody may work twice in that window",
            employees, window
        ));
    }

    warnings
}

/// Warning for a solve that ended without a definitive answer.
pub fn status_report(status: SolveStatus) -> Vec<String> {
    vec![format!("Schedule creation failed with status: {}", status)]
}
