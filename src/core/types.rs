/*!
 * Core Types
 * Common types used across the simulator
 */

use serde::{Deserialize, Serialize};

/// Process ID type (OS pid of a launched child)
pub type Pid = u32;

/// Priority rating (lower value is dispatched first)
pub type Priority = i32;

/// Job size for shortest-job-first ordering (lower value is dispatched first)
pub type Size = i64;

/// Process control block: static identity of one schedulable unit.
///
/// Produced by the launcher, consumed read-only by the scheduling core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Pcb {
    pub pid: Pid,
    /// Path label of the launched program (reporting only).
    pub path: String,
    pub priority: Priority,
    pub size: Size,
}

impl Pcb {
    pub fn new(pid: Pid, path: impl Into<String>, priority: Priority, size: Size) -> Self {
        Self {
            pid,
            path: path.into(),
            priority,
            size,
        }
    }
}
