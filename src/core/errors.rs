/*!
 * Error Types
 * Centralized error handling with thiserror
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduling operation result
pub type SchedResult<T> = Result<T, SchedError>;

/// Scheduler errors
///
/// Per-entry faults (signal/wait failures) are recoverable: the dispatch
/// loops flag the entry and keep going. Structural precondition violations
/// are not represented here; those panic at the violation site.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedError {
    #[error("Process not found: {0}")]
    ProcessNotFound(Pid),

    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Signal delivery failed for pid {pid}: {reason}")]
    SignalFailed { pid: Pid, reason: String },

    #[error("Wait failed for pid {pid}: {reason}")]
    WaitFailed { pid: Pid, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid quantum: {0}")]
    InvalidQuantum(String),
}
