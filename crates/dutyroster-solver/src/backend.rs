//! Solver collaborator interface.

use std::fmt::Debug;
use std::time::Duration;

use dutyroster_config::TerminationConfig;
use dutyroster_core::SolveStatus;
use dutyroster_model::{BoolVar, CpModel};

use crate::statistics::SearchStatistics;

/// Budget for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Wall-clock bound.
    pub time_limit: Option<Duration>,
    /// Bound on explored search nodes.
    pub node_limit: Option<u64>,
}

impl SearchLimits {
    /// No limits; the search runs until it proves optimality.
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TerminationConfig) -> Self {
        Self {
            time_limit: config.time_limit(),
            node_limit: config.node_count_limit,
        }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }
}

/// Result of one solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// One value per model variable; empty unless `status.has_solution()`.
    pub values: Vec<bool>,
    /// Objective value of `values`.
    pub objective: Option<i64>,
    pub statistics: SearchStatistics,
}

impl SolveOutcome {
    /// An outcome without an assignment.
    pub fn without_solution(status: SolveStatus, statistics: SearchStatistics) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective: None,
            statistics,
        }
    }

    /// Returns the fixed value of `var`; false when there is no solution.
    pub fn value_of(&self, var: BoolVar) -> bool {
        self.values.get(var.index()).copied().unwrap_or(false)
    }
}

/// A solver that accepts a boolean model and returns an assignment or a
/// terminal status.
///
/// Implementations must not return `Optimal` or `Feasible` with values
/// that violate a constraint of `model`.
pub trait SolverBackend: Send + Sync + Debug {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    fn solve(&self, model: &CpModel, limits: &SearchLimits) -> SolveOutcome;
}
