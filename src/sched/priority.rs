/*!
 * Priority / Shortest-Job-First Dispatch
 * Non-preemptive run-to-completion over a sorted queue
 */

use super::queue::ReadyQueue;
use super::sort::SortKey;
use super::state::RunState;
use crate::control::ProcessController;
use log::{info, warn};
use std::time::Instant;

/// Run-to-completion dispatcher.
///
/// Sorts the linear queue by its key (priority for priority scheduling,
/// size for shortest-job-first; ascending in both) and walks it once,
/// blocking on each process until it exits. No preemption, no
/// re-visitation: every entry is dispatched exactly once.
///
/// A process that never exits stalls the whole run; that is the documented
/// cost of the blocking wait. A signal failure only abandons the one entry.
#[derive(Debug, Clone, Copy)]
pub struct RunToCompletion {
    key: SortKey,
}

impl RunToCompletion {
    /// Priority scheduling: smallest priority value first.
    pub fn priority() -> Self {
        Self {
            key: SortKey::Priority,
        }
    }

    /// Shortest-job-first: smallest size first.
    pub fn shortest_job_first() -> Self {
        Self { key: SortKey::Size }
    }

    pub fn key(&self) -> SortKey {
        self.key
    }

    /// Sort and drain the queue, head to tail.
    pub fn run(&self, queue: &mut ReadyQueue, control: &dyn ProcessController) -> RunState {
        let mut state = RunState::new(queue.len());
        if state.complete() {
            return state;
        }

        queue.sort_by(self.key);
        info!(
            "Run-to-completion dispatch over {} entries, key {:?}",
            state.total, self.key
        );

        for idx in queue.order() {
            if !queue.entry(idx).dispatchable() {
                continue;
            }
            self.dispatch(queue, idx, control, &mut state);
        }

        info!(
            "Run-to-completion complete: {} terminated, {} failed",
            state.terminated, state.failed
        );
        state
    }

    /// Give the entry the CPU until its process exits.
    fn dispatch(
        &self,
        queue: &mut ReadyQueue,
        idx: usize,
        control: &dyn ProcessController,
        state: &mut RunState,
    ) {
        let pid = queue.entry(idx).pid;
        info!(
            "CPU burst for [{}] pid {} (priority {}, size {})",
            queue.entry(idx).path,
            pid,
            queue.entry(idx).priority,
            queue.entry(idx).size
        );

        let started = Instant::now();
        let waited = control.resume(pid).and_then(|_| control.wait_blocking(pid));
        let ended = Instant::now();

        let entry = queue.entry_mut(idx);
        match waited {
            Ok(code) => {
                entry.burst_time = ended.duration_since(started);
                entry.num_bursts = 1;
                entry.finalize(ended);
                state.bursts_granted += 1;
                state.terminated += 1;
                info!("pid {} ran to completion with exit code {}", pid, code);
            }
            Err(e) => {
                entry.failed = true;
                state.failed += 1;
                warn!("Abandoning pid {}: {}", pid, e);
            }
        }
    }
}
