//! Node count termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates after a number of search nodes.
///
/// Unlike [`TimeTermination`](super::TimeTermination), the outcome does not
/// depend on machine speed.
///
/// # Example
///
/// ```
/// use dutyroster_solver::termination::NodeCountTermination;
///
/// let term = NodeCountTermination::new(250_000);
/// ```
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.nodes() >= self.limit
    }
}
