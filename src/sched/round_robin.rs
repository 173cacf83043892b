/*!
 * Round-Robin Dispatch
 * Preemptive quantum-based loop over the circular ready queue
 */

use super::queue::ReadyQueue;
use super::state::RunState;
use crate::control::ProcessController;
use crate::core::Pid;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Round-robin dispatcher with a fixed time quantum.
///
/// Each sweep grants every live entry one quantum: resume the process,
/// sleep for the quantum on the control thread, stop the process, then poll
/// for exit without blocking. Exit is therefore only ever detected at a
/// quantum boundary; a process that finishes mid-quantum is charged the
/// full quantum it was granted.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: Duration,
}

impl RoundRobin {
    /// Default time quantum (matches the classic 500 ms teaching setup).
    pub const DEFAULT_QUANTUM: Duration = Duration::from_millis(500);

    pub fn new(quantum: Duration) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> Duration {
        self.quantum
    }

    /// Drive the queue until every entry terminated or failed.
    ///
    /// Circularizes the queue for its own use; the ring stays in place
    /// afterwards (release takes the entry count either way). Terminated
    /// and failed entries are skipped in O(1) without disturbing cycle
    /// order for the rest.
    pub fn run(&self, queue: &mut ReadyQueue, control: &dyn ProcessController) -> RunState {
        let mut state = RunState::new(queue.len());
        if state.complete() {
            return state;
        }

        queue.circularize();
        info!(
            "Round-robin dispatch over {} entries, quantum {:?}",
            state.total, self.quantum
        );

        let mut cursor = queue.head().expect("non-empty queue has a head");
        while !state.complete() {
            if queue.entry(cursor).dispatchable() {
                self.grant_burst(queue, cursor, control, &mut state);
            }
            cursor = queue.next_of(cursor).expect("circular queue never ends");
        }

        info!(
            "Round-robin run complete: {} terminated, {} failed, {} bursts",
            state.terminated, state.failed, state.bursts_granted
        );
        state
    }

    /// Grant one quantum to the entry at `idx`, then poll for its exit.
    fn grant_burst(
        &self,
        queue: &mut ReadyQueue,
        idx: usize,
        control: &dyn ProcessController,
        state: &mut RunState,
    ) {
        let pid = queue.entry(idx).pid;
        debug!(
            "CPU burst for [{}] pid {} ({} so far)",
            queue.entry(idx).path,
            pid,
            queue.entry(idx).num_bursts
        );

        let started = Instant::now();
        if let Err(e) = control.resume(pid) {
            abandon(queue, idx, state, &e.to_string());
            return;
        }

        std::thread::sleep(self.quantum);

        // The process may have exited inside the quantum; a failed stop is
        // expected then and the wait below settles it.
        if let Err(e) = control.suspend(pid) {
            debug!("Stop after quantum failed for pid {}: {}", pid, e);
        }
        let ended = Instant::now();

        let entry = queue.entry_mut(idx);
        entry.burst_time += ended.duration_since(started);
        entry.num_bursts += 1;
        state.bursts_granted += 1;

        match control.try_wait(pid) {
            Ok(Some(code)) => {
                entry.finalize(ended);
                state.terminated += 1;
                info!(
                    "pid {} exited with code {} after {} bursts",
                    pid, code, entry.num_bursts
                );
            }
            Ok(None) => {}
            Err(e) => abandon(queue, idx, state, &e.to_string()),
        }
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUANTUM)
    }
}

/// Flag an entry as unreachable and count it out of the run. Its completion
/// stats stay zeroed; the rest of the queue keeps being scheduled.
fn abandon(queue: &mut ReadyQueue, idx: usize, state: &mut RunState, reason: &str) {
    let entry = queue.entry_mut(idx);
    let pid: Pid = entry.pid;
    entry.failed = true;
    state.failed += 1;
    warn!("Abandoning pid {}: {}", pid, reason);
}
