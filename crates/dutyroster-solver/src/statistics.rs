//! Search statistics collection.
//!
//! Tracks node and backtrack counts, timing and the history of incumbent
//! improvements for one solve.

use std::time::Duration;

/// Record of an incumbent improvement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Improvement {
    /// Node count when the incumbent was found.
    pub node: u64,
    /// Time since solving started.
    pub elapsed: Duration,
    /// Objective value of the new incumbent.
    pub objective: i64,
}

/// Complete statistics for a search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Search nodes visited.
    pub nodes: u64,
    /// Decisions undone.
    pub backtracks: u64,
    /// Complete assignments reached, improving or not.
    pub solutions_found: u64,
    /// Total time spent solving.
    pub elapsed: Duration,
    /// History of incumbent improvements, in order.
    pub improvements: Vec<Improvement>,
}

impl SearchStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the best objective found (last in history, or None).
    pub fn best_objective(&self) -> Option<i64> {
        self.improvements.last().map(|i| i.objective)
    }

    /// Returns the number of incumbent improvements recorded.
    pub fn improvement_count(&self) -> usize {
        self.improvements.len()
    }

    /// Returns the nodes visited per second.
    pub fn nodes_per_second(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.nodes as f64 / secs) as u64
        } else {
            0
        }
    }
}
