/*!
 * Run State
 * Explicit per-run bookkeeping threaded through the dispatch loops
 */

use serde::{Deserialize, Serialize};

/// Progress of one scheduling run.
///
/// Dispatch loops take this by value conceptually: each step mutates the
/// state it was handed and the finished state is returned to the caller,
/// keeping the loops free of hidden counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunState {
    /// Entry count supplied at run start.
    pub total: usize,
    /// Entries that were observed to exit.
    pub terminated: usize,
    /// Entries abandoned after a signal/wait failure.
    pub failed: usize,
    /// Bursts granted across the whole run.
    pub bursts_granted: u64,
}

impl RunState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// A run is complete when every entry either terminated or was abandoned.
    pub fn complete(&self) -> bool {
        self.terminated + self.failed >= self.total
    }
}
