/*!
 * Process Launcher
 * Spawns workload programs, suspends them immediately, and owns their
 * handles for the lifetime of a scheduling run
 */

mod config;

pub use config::{WorkloadConfig, WorkloadSpec};

use crate::control::{ExitCode, ProcessController};
use crate::core::{Pcb, Pid, SchedError, SchedResult};
use dashmap::DashMap;
use log::{error, info, warn};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;

#[cfg(unix)]
use nix::sys::signal::{kill, Signal as UnixSignal};
#[cfg(unix)]
use nix::unistd::Pid as NixPid;

/// A launched child under scheduler control.
#[derive(Debug)]
struct LaunchedProcess {
    path: String,
    child: Child,
}

/// Launches workload processes and exposes the control capability over them.
///
/// Every child is stopped with SIGSTOP the moment it is spawned, so the
/// whole workload sits suspended until a dispatch loop grants it a burst.
pub struct Launcher {
    processes: Arc<DashMap<Pid, LaunchedProcess>>,
}

impl Launcher {
    pub fn new() -> Self {
        info!("Process launcher initialized");
        Self {
            processes: Arc::new(DashMap::new()),
        }
    }

    /// Spawn one workload program suspended, returning its PCB.
    pub fn spawn(&self, spec: &WorkloadSpec) -> SchedResult<Pcb> {
        validate_command(&spec.command)?;

        let child = Command::new(&spec.command)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| SchedError::SpawnFailed(format!("{}: {}", spec.command, e)))?;

        let pid = child.id();

        // Freeze the child before it makes progress; the first burst it gets
        // must come from a dispatch loop.
        if let Err(e) = signal_stop(pid) {
            warn!("Could not suspend freshly spawned pid {}: {}", pid, e);
        }

        info!(
            "Launched '{}' (pid {}, priority {}, size {}) - suspended",
            spec.command, pid, spec.priority, spec.size
        );

        self.processes.insert(
            pid,
            LaunchedProcess {
                path: spec.command.clone(),
                child,
            },
        );

        Ok(Pcb::new(pid, &spec.command, spec.priority, spec.size))
    }

    /// Launch every entry of a workload. A spawn failure is logged and the
    /// entry skipped; it never aborts the launch of the rest.
    pub fn launch_all(&self, config: &WorkloadConfig) -> Vec<Pcb> {
        let mut pcbs = Vec::with_capacity(config.len());
        for spec in &config.entries {
            match self.spawn(spec) {
                Ok(pcb) => pcbs.push(pcb),
                Err(e) => error!("Skipping workload entry '{}': {}", spec.command, e),
            }
        }
        info!("Launched {}/{} workload processes", pcbs.len(), config.len());
        pcbs
    }

    /// Path label recorded for a launched pid.
    pub fn path_of(&self, pid: Pid) -> Option<String> {
        self.processes.get(&pid).map(|p| p.path.clone())
    }

    /// Number of children still held by the launcher.
    pub fn count(&self) -> usize {
        self.processes.len()
    }

    /// Best-effort terminate and reap of every remaining child.
    pub fn terminate_all(&self) {
        let pids: Vec<Pid> = self.processes.iter().map(|p| *p.key()).collect();
        for pid in pids {
            if let Err(e) = self.terminate(pid) {
                warn!("Teardown of pid {} failed: {}", pid, e);
            }
        }
    }
}

impl ProcessController for Launcher {
    fn resume(&self, pid: Pid) -> SchedResult<()> {
        if !self.processes.contains_key(&pid) {
            return Err(SchedError::ProcessNotFound(pid));
        }
        signal_cont(pid)
    }

    fn suspend(&self, pid: Pid) -> SchedResult<()> {
        if !self.processes.contains_key(&pid) {
            return Err(SchedError::ProcessNotFound(pid));
        }
        signal_stop(pid)
    }

    fn try_wait(&self, pid: Pid) -> SchedResult<Option<ExitCode>> {
        let mut entry = self
            .processes
            .get_mut(&pid)
            .ok_or(SchedError::ProcessNotFound(pid))?;

        let polled = entry.child.try_wait();
        drop(entry);

        match polled {
            Ok(Some(status)) => {
                // Reaped: forget the handle so teardown never signals a
                // recycled pid.
                self.processes.remove(&pid);
                Ok(Some(status.code().unwrap_or(-1)))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(SchedError::WaitFailed {
                pid,
                reason: e.to_string(),
            }),
        }
    }

    fn wait_blocking(&self, pid: Pid) -> SchedResult<ExitCode> {
        let mut entry = self
            .processes
            .get_mut(&pid)
            .ok_or(SchedError::ProcessNotFound(pid))?;

        let waited = entry.child.wait();
        drop(entry);

        match waited {
            Ok(status) => {
                self.processes.remove(&pid);
                Ok(status.code().unwrap_or(-1))
            }
            Err(e) => Err(SchedError::WaitFailed {
                pid,
                reason: e.to_string(),
            }),
        }
    }

    fn terminate(&self, pid: Pid) -> SchedResult<()> {
        let (_, mut proc) = self
            .processes
            .remove(&pid)
            .ok_or(SchedError::ProcessNotFound(pid))?;

        // A stopped process only sees SIGTERM once it is continued.
        let _ = signal_term(pid);
        let _ = signal_cont(pid);

        match proc.child.wait() {
            Ok(status) => {
                info!(
                    "Terminated '{}' (pid {}), exit status {:?}",
                    proc.path,
                    pid,
                    status.code()
                );
                Ok(())
            }
            Err(e) => Err(SchedError::WaitFailed {
                pid,
                reason: e.to_string(),
            }),
        }
    }
}

impl Clone for Launcher {
    fn clone(&self) -> Self {
        Self {
            processes: Arc::clone(&self.processes),
        }
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a command path before spawning.
fn validate_command(command: &str) -> SchedResult<()> {
    if command.trim().is_empty() {
        return Err(SchedError::InvalidCommand("empty command".to_string()));
    }

    let dangerous_chars = [';', '|', '&', '\n', '\r', '\0', '`', '$', '(', ')'];
    if dangerous_chars.iter().any(|&c| command.contains(c)) {
        return Err(SchedError::InvalidCommand(
            "command contains shell metacharacters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(unix)]
fn send_signal(pid: Pid, signal: UnixSignal) -> SchedResult<()> {
    kill(NixPid::from_raw(pid as i32), signal).map_err(|e| SchedError::SignalFailed {
        pid,
        reason: e.to_string(),
    })
}

#[cfg(unix)]
fn signal_stop(pid: Pid) -> SchedResult<()> {
    send_signal(pid, UnixSignal::SIGSTOP)
}

#[cfg(unix)]
fn signal_cont(pid: Pid) -> SchedResult<()> {
    send_signal(pid, UnixSignal::SIGCONT)
}

#[cfg(unix)]
fn signal_term(pid: Pid) -> SchedResult<()> {
    send_signal(pid, UnixSignal::SIGTERM)
}

/// Non-Unix stubs: stop/continue process control is not available.
#[cfg(not(unix))]
fn unsupported(pid: Pid) -> SchedResult<()> {
    warn!("Process control signals not supported on this platform");
    Err(SchedError::SignalFailed {
        pid,
        reason: "unsupported platform".to_string(),
    })
}

#[cfg(not(unix))]
fn signal_stop(pid: Pid) -> SchedResult<()> {
    unsupported(pid)
}

#[cfg(not(unix))]
fn signal_cont(pid: Pid) -> SchedResult<()> {
    unsupported(pid)
}

#[cfg(not(unix))]
fn signal_term(pid: Pid) -> SchedResult<()> {
    unsupported(pid)
}
