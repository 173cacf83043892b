/*!
 * Process Control
 * Capability interface for suspending, resuming, and reaping the
 * OS processes being scheduled
 */

mod sim;

pub use sim::SimController;

use crate::core::{Pid, SchedResult};

/// Exit code reported for a reaped process.
pub type ExitCode = i32;

/// Control surface the dispatch loops use to drive a process.
///
/// The scheduler never touches process handles directly; everything goes
/// through this trait so the dispatch algorithms are testable against a
/// simulated controller without spawning real OS processes.
pub trait ProcessController: Send + Sync {
    /// Resume a stopped process (SIGCONT).
    fn resume(&self, pid: Pid) -> SchedResult<()>;

    /// Stop a running process (SIGSTOP).
    fn suspend(&self, pid: Pid) -> SchedResult<()>;

    /// Non-blocking completion check (WNOHANG). Returns the exit code if the
    /// process has exited, `None` if it is still alive.
    fn try_wait(&self, pid: Pid) -> SchedResult<Option<ExitCode>>;

    /// Block until the process exits and return its exit code.
    fn wait_blocking(&self, pid: Pid) -> SchedResult<ExitCode>;

    /// Terminate the process (SIGTERM) and reap it.
    fn terminate(&self, pid: Pid) -> SchedResult<()>;
}
