/*!
 * Simulated Process Control
 * Scripted controller so dispatch loops can run without real OS processes
 */

use super::{ExitCode, ProcessController};
use crate::core::{Pid, SchedError, SchedResult};
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Scripted state for one simulated process.
#[derive(Debug, Clone)]
struct SimProcess {
    /// Quanta this process needs before it exits.
    bursts_required: u32,
    bursts_granted: u32,
    exited: bool,
    /// When set, every signal delivery to this pid fails.
    unreachable: bool,
}

/// In-memory controller that mimics stop/continue/wait semantics.
///
/// Each registered pid is scripted with the number of bursts it needs.
/// `resume` grants a burst; once enough bursts were granted the process is
/// considered exited and `try_wait` reports it. `wait_blocking` grants all
/// remaining bursts at once, mirroring run-to-completion dispatch.
#[derive(Debug, Default)]
pub struct SimController {
    processes: Mutex<HashMap<Pid, SimProcess>>,
    /// Order in which bursts were granted, for assertions on dispatch order.
    dispatch_log: Mutex<Vec<Pid>>,
}

impl SimController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a simulated process that exits after `bursts_required` grants.
    pub fn register(&self, pid: Pid, bursts_required: u32) {
        self.processes.lock().insert(
            pid,
            SimProcess {
                bursts_required,
                bursts_granted: 0,
                exited: false,
                unreachable: false,
            },
        );
    }

    /// Register a process whose signals always fail (invalid handle script).
    pub fn register_unreachable(&self, pid: Pid) {
        self.processes.lock().insert(
            pid,
            SimProcess {
                bursts_required: u32::MAX,
                bursts_granted: 0,
                exited: false,
                unreachable: true,
            },
        );
    }

    /// Pids in the order bursts were granted to them.
    pub fn dispatch_log(&self) -> Vec<Pid> {
        self.dispatch_log.lock().clone()
    }

    fn signal_check(proc: &SimProcess, pid: Pid) -> SchedResult<()> {
        if proc.unreachable {
            return Err(SchedError::SignalFailed {
                pid,
                reason: "scripted failure".into(),
            });
        }
        Ok(())
    }
}

impl ProcessController for SimController {
    fn resume(&self, pid: Pid) -> SchedResult<()> {
        let mut processes = self.processes.lock();
        let proc = processes
            .get_mut(&pid)
            .ok_or(SchedError::ProcessNotFound(pid))?;
        Self::signal_check(proc, pid)?;
        if proc.exited {
            return Err(SchedError::SignalFailed {
                pid,
                reason: "process already exited".into(),
            });
        }

        proc.bursts_granted += 1;
        if proc.bursts_granted >= proc.bursts_required {
            proc.exited = true;
        }
        debug!(
            "sim: granted burst {}/{} to pid {}",
            proc.bursts_granted, proc.bursts_required, pid
        );

        self.dispatch_log.lock().push(pid);
        Ok(())
    }

    fn suspend(&self, pid: Pid) -> SchedResult<()> {
        let mut processes = self.processes.lock();
        let proc = processes
            .get_mut(&pid)
            .ok_or(SchedError::ProcessNotFound(pid))?;
        Self::signal_check(proc, pid)?;
        // Stopping a process that exited mid-quantum is a no-op, matching the
        // coarse-grained detection the round-robin loop relies on.
        Ok(())
    }

    fn try_wait(&self, pid: Pid) -> SchedResult<Option<ExitCode>> {
        let processes = self.processes.lock();
        let proc = processes
            .get(&pid)
            .ok_or(SchedError::ProcessNotFound(pid))?;
        Ok(proc.exited.then_some(0))
    }

    fn wait_blocking(&self, pid: Pid) -> SchedResult<ExitCode> {
        let mut processes = self.processes.lock();
        let proc = processes
            .get_mut(&pid)
            .ok_or(SchedError::ProcessNotFound(pid))?;
        if proc.unreachable {
            return Err(SchedError::WaitFailed {
                pid,
                reason: "scripted failure".into(),
            });
        }

        if !proc.exited {
            proc.bursts_granted = proc.bursts_required;
            proc.exited = true;
        }
        Ok(0)
    }

    fn terminate(&self, pid: Pid) -> SchedResult<()> {
        let mut processes = self.processes.lock();
        let proc = processes
            .get_mut(&pid)
            .ok_or(SchedError::ProcessNotFound(pid))?;
        proc.exited = true;
        Ok(())
    }
}
