//! Terminal solver states.

use std::fmt;

/// Terminal state reported by a solver backend.
///
/// `Unknown` and `ModelInvalid` are the "other" outcomes: the solver gave
/// no definitive answer, or rejected the model outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SolveStatus {
    /// A provably best assignment was found.
    Optimal,
    /// An assignment was found, optimality not proven.
    Feasible,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The search stopped without an answer (time or node budget).
    Unknown,
    /// The model was rejected before searching.
    ModelInvalid,
}

impl SolveStatus {
    /// Returns true if the status carries a usable assignment.
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::Feasible => write!(f, "FEASIBLE"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::Unknown => write!(f, "UNKNOWN"),
            SolveStatus::ModelInvalid => write!(f, "MODEL_INVALID"),
        }
    }
}
