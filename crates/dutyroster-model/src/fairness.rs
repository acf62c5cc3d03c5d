//! Fairness band derivation.
//!
//! The horizon is split evenly: `base = D / W`, and the first `D mod W`
//! employees in roster order take one extra day. Each target is then
//! widened by the policy slack so that the band alone never makes the
//! model infeasible.

use dutyroster_config::PolicyConfig;

/// Allowed range of total duty days for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FairnessBand {
    pub min: u32,
    pub max: u32,
}

impl FairnessBand {
    pub fn contains(&self, count: u32) -> bool {
        self.min <= count && count <= self.max
    }
}

/// Even split of the horizon plus the per-employee bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FairnessPlan {
    /// `D / W`, integer division.
    pub base: u32,
    /// `D mod W`.
    pub remainder: u32,
    /// One band per employee, in roster order.
    pub bands: Vec<FairnessBand>,
}

/// Computes the fairness bands for `num_days` over `num_employees`.
///
/// `num_employees` must be positive.
///
/// # Examples
///
/// ```
/// use dutyroster_config::PolicyConfig;
/// use dutyroster_model::fairness_bands;
///
/// let plan = fairness_bands(365, 5, &PolicyConfig::default());
/// assert_eq!(plan.base, 73);
/// assert_eq!(plan.bands[0].min, 68);
/// assert_eq!(plan.bands[0].max, 78);
/// ```
pub fn fairness_bands(num_days: usize, num_employees: usize, policy: &PolicyConfig) -> FairnessPlan {
    debug_assert!(num_employees > 0);
    let base = (num_days / num_employees) as u32;
    let remainder = (num_days % num_employees) as u32;

    let bands = (0..num_employees as u32)
        .map(|w| {
            let target_max = base + u32::from(w < remainder);
            FairnessBand {
                min: base
                    .saturating_sub(policy.fairness_slack)
                    .max(policy.min_assignments_floor),
                max: target_max + policy.fairness_slack,
            }
        })
        .collect();

    FairnessPlan {
        base,
        remainder,
        bands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_goes_to_first_employees() {
        let plan = fairness_bands(10, 3, &PolicyConfig::default());
        assert_eq!(plan.base, 3);
        assert_eq!(plan.remainder, 1);
        let maxima: Vec<_> = plan.bands.iter().map(|b| b.max).collect();
        assert_eq!(maxima, vec![9, 8, 8]);
    }

    #[test]
    fn test_floor_applies_when_base_is_small() {
        let plan = fairness_bands(10, 3, &PolicyConfig::default());
        assert!(plan.bands.iter().all(|b| b.min == 1));
    }

    #[test]
    fn test_tight_policy_without_slack() {
        let policy = PolicyConfig {
            fairness_slack: 0,
            min_assignments_floor: 0,
            ..PolicyConfig::default()
        };
        let plan = fairness_bands(7, 2, &policy);
        assert_eq!(plan.bands[0], FairnessBand { min: 3, max: 4 });
        assert_eq!(plan.bands[1], FairnessBand { min: 3, max: 3 });
        assert!(plan.bands[1].contains(3));
        assert!(!plan.bands[1].contains(4));
    }
}
