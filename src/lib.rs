/*!
 * sched-sim Library
 * Educational CPU-scheduler simulator driving suspended OS processes
 * with stop/continue signals
 */

pub mod control;
pub mod core;
pub mod launcher;
pub mod sched;
pub mod trace;

// Re-exports
pub use crate::control::{ProcessController, SimController};
pub use crate::core::{Pcb, Pid, Priority, SchedError, SchedResult, Size};
pub use crate::launcher::{Launcher, WorkloadConfig, WorkloadSpec};
pub use crate::sched::{
    summarize, ReadyQueue, RoundRobin, RunState, RunSummary, RunToCompletion, Scheduler,
    SchedulingPolicy, SortKey, TimeQuantum,
};
pub use crate::trace::init_tracing;
