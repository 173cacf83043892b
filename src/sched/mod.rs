/*!
 * Scheduling Core
 * Ready queue, ordering engine, dispatch loops, and run reporting
 */

mod entry;
mod policy;
mod priority;
mod queue;
mod report;
mod round_robin;
mod sort;
mod state;

pub use entry::ScheduleEntry;
pub use policy::{SchedulingPolicy, TimeQuantum};
pub use priority::RunToCompletion;
pub use queue::ReadyQueue;
pub use report::{summarize, EntryReport, RunSummary};
pub use round_robin::RoundRobin;
pub use sort::SortKey;
pub use state::RunState;

use crate::control::ProcessController;
use log::info;

/// Scheduler facade: a policy plus its quantum, driving one run end to end.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    policy: SchedulingPolicy,
    quantum: TimeQuantum,
}

impl Scheduler {
    /// Create a scheduler with the default 500 ms quantum.
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self::with_quantum(policy, TimeQuantum::default())
    }

    /// Create a scheduler with a custom quantum (only round-robin uses it).
    pub fn with_quantum(policy: SchedulingPolicy, quantum: TimeQuantum) -> Self {
        info!(
            "Scheduler initialized: policy={}, quantum={}μs",
            policy.as_str(),
            quantum.as_micros()
        );
        Self { policy, quantum }
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    pub fn quantum(&self) -> TimeQuantum {
        self.quantum
    }

    /// Dispatch the whole queue under the configured policy and summarize.
    pub fn run(&self, queue: &mut ReadyQueue, control: &dyn ProcessController) -> RunSummary {
        let state = match self.policy {
            SchedulingPolicy::RoundRobin => {
                RoundRobin::new(self.quantum.as_duration()).run(queue, control)
            }
            SchedulingPolicy::Priority => RunToCompletion::priority().run(queue, control),
            SchedulingPolicy::ShortestJobFirst => {
                RunToCompletion::shortest_job_first().run(queue, control)
            }
        };

        summarize(queue, self.policy, state)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulingPolicy::RoundRobin)
    }
}
