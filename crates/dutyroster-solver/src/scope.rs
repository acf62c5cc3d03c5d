//! Progress view of a running search.

use std::time::{Duration, Instant};

/// Clock and counters consulted by terminations.
#[derive(Debug, Clone)]
pub struct SearchScope {
    start: Instant,
    nodes: u64,
}

impl SearchScope {
    /// Starts the clock.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            nodes: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn increment_nodes(&mut self) {
        self.nodes += 1;
    }
}
