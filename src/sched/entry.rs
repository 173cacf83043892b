/*!
 * Schedule Entry
 * Live scheduling state wrapped around one PCB
 */

use crate::core::{Pcb, Pid, Priority, Size};
use std::time::{Duration, Instant};

/// One schedulable unit inside the ready queue.
///
/// Identity fields are copied from the PCB at enqueue time so the queue is
/// self-contained after construction. `next`/`prev` are arena indices into
/// the owning queue; they are never dangling while the entry is linked.
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    pub pid: Pid,
    pub path: String,
    pub priority: Priority,
    pub size: Size,

    pub terminated: bool,
    /// Signal delivery to this process failed; it is skipped from then on
    /// and reported with zero completion stats.
    pub failed: bool,

    pub burst_time: Duration,
    pub num_bursts: u32,
    pub arrival: Instant,
    pub turnaround: Option<Duration>,
    pub waiting: Option<Duration>,

    pub(super) next: Option<usize>,
    pub(super) prev: Option<usize>,
}

impl ScheduleEntry {
    pub fn new(pcb: &Pcb) -> Self {
        Self {
            pid: pcb.pid,
            path: pcb.path.clone(),
            priority: pcb.priority,
            size: pcb.size,
            terminated: false,
            failed: false,
            burst_time: Duration::ZERO,
            num_bursts: 0,
            arrival: Instant::now(),
            turnaround: None,
            waiting: None,
            next: None,
            prev: None,
        }
    }

    /// Whether a dispatch loop should still grant this entry bursts.
    pub fn dispatchable(&self) -> bool {
        !self.terminated && !self.failed
    }

    /// Freeze completion timing at the moment termination was observed.
    ///
    /// Waiting time is the turnaround minus the accumulated burst time;
    /// the subtraction saturates so a clock hiccup can never produce a
    /// negative duration.
    pub fn finalize(&mut self, completed_at: Instant) {
        debug_assert!(!self.terminated, "entry finalized twice");

        let turnaround = completed_at.duration_since(self.arrival);
        self.turnaround = Some(turnaround);
        self.waiting = Some(turnaround.saturating_sub(self.burst_time));
        self.terminated = true;
    }
}
