//! Configuration system for DutyRoster.
//!
//! Load scheduling policy from TOML or YAML files to tune fairness slack,
//! anti-clustering, penalty weights, the solve budget and the holiday
//! calendar without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use dutyroster_config::SchedulingConfig;
//! use std::time::Duration;
//!
//! let config = SchedulingConfig::from_toml_str(r#"
//!     holidays = ["2025-01-01", "2025-07-04", "2025-12-25"]
//!
//!     [policy]
//!     fairness_slack = 3
//!
//!     [penalties]
//!     preferred_off = 200
//!
//!     [termination]
//!     seconds_spent_limit = 10
//! "#).unwrap();
//!
//! assert_eq!(config.policy.fairness_slack, 3);
//! assert_eq!(config.policy.max_consecutive, 3);
//! assert_eq!(config.penalties.preferred_off, 200);
//! assert_eq!(config.penalties.holiday, 50);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(10)));
//! assert_eq!(config.holidays.len(), 3);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use dutyroster_config::SchedulingConfig;
//!
//! let config = SchedulingConfig::load("dutyroster.toml").unwrap_or_default();
//! assert_eq!(config.policy.fairness_slack, 5);
//! ```

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default wall-clock limit for one solve.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

/// Default node budget for the built-in search backend.
pub const DEFAULT_NODE_COUNT_LIMIT: u64 = 250_000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main scheduling configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulingConfig {
    /// Constraint policy.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Objective weights.
    #[serde(default)]
    pub penalties: PenaltyConfig,

    /// Solve budget.
    #[serde(default)]
    pub termination: TerminationConfig,

    /// Employee preference limits.
    #[serde(default)]
    pub preferences: PreferenceConfig,

    /// Company holidays, weighted in the objective.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

impl SchedulingConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Checks values that would make the model meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.penalties.prior_load_divisor == 0 {
            return Err(ConfigError::Invalid(
                "penalties.prior_load_divisor must be positive".to_string(),
            ));
        }
        let factor = self.policy.imbalance_factor;
        if factor.is_nan() || factor < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "policy.imbalance_factor must be at least 1.0, got {}",
                factor
            )));
        }
        if self.termination.seconds_spent_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "termination.seconds_spent_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.termination.seconds_spent_limit = Some(seconds);
        self
    }

    /// Sets the node budget of the search backend.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.termination.node_count_limit = Some(nodes);
        self
    }

    /// Sets the holiday calendar.
    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays = holidays.into_iter().collect();
        self
    }

    /// Sets the constraint policy.
    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the objective weights.
    pub fn with_penalties(mut self, penalties: PenaltyConfig) -> Self {
        self.penalties = penalties;
        self
    }

    /// Returns the wall-clock limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.time_limit()
    }

    /// Returns the node budget, if configured.
    pub fn node_limit(&self) -> Option<u64> {
        self.termination.node_count_limit
    }
}

/// Hard-constraint policy parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PolicyConfig {
    /// Shifts an employee may deviate from the even split, in both directions.
    pub fairness_slack: u32,

    /// Lower bound never drops below this many shifts.
    pub min_assignments_floor: u32,

    /// Every window of `max_consecutive + 1` consecutive days holds at most
    /// one duty per employee.
    pub max_consecutive: usize,

    /// Prior-year load above `imbalance_factor * base` triggers a warning.
    pub imbalance_factor: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            fairness_slack: 5,
            min_assignments_floor: 1,
            max_consecutive: 3,
            imbalance_factor: 1.5,
        }
    }
}

impl PolicyConfig {
    /// Length of the anti-clustering window.
    pub fn window_len(&self) -> usize {
        self.max_consecutive + 1
    }
}

/// Objective weights.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PenaltyConfig {
    /// Cost of putting an employee on duty on a preferred off date.
    pub preferred_off: i64,

    /// Cost of any duty on a holiday.
    pub holiday: i64,

    /// Cost of any duty on a Saturday or Sunday.
    pub weekend: i64,

    /// Prior-year shifts are divided by this to get a standing per-day bias.
    pub prior_load_divisor: u32,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            preferred_off: 100,
            holiday: 50,
            weekend: 10,
            prior_load_divisor: 10,
        }
    }
}

/// Solve budget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving; added to the seconds limit.
    pub millis_spent_limit: Option<u64>,

    /// Maximum search nodes to explore.
    pub node_count_limit: Option<u64>,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            seconds_spent_limit: Some(DEFAULT_TIME_LIMIT_SECS),
            millis_spent_limit: None,
            node_count_limit: Some(DEFAULT_NODE_COUNT_LIMIT),
        }
    }
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let limit = Duration::from_secs(self.seconds_spent_limit.unwrap_or(0))
            .saturating_add(Duration::from_millis(self.millis_spent_limit.unwrap_or(0)));
        if limit.is_zero() {
            None
        } else {
            Some(limit)
        }
    }
}

/// Limits on employee-submitted preferences.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PreferenceConfig {
    /// Maximum preferred off dates per employee and year.
    pub max_preferred_off_days: usize,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            max_preferred_off_days: 5,
        }
    }
}
