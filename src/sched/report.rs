/*!
 * Run Report
 * Read-side reduction of a finished run into per-entry rows and aggregates
 */

use super::entry::ScheduleEntry;
use super::policy::SchedulingPolicy;
use super::queue::ReadyQueue;
use super::state::RunState;
use crate::core::{Pid, Priority, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Scheduling outcome for one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EntryReport {
    pub path: String,
    pub pid: Pid,
    pub priority: Priority,
    pub size: Size,
    pub num_bursts: u32,
    pub burst_secs: f64,
    pub turnaround_secs: f64,
    pub waiting_secs: f64,
    pub terminated: bool,
}

impl EntryReport {
    fn from_entry(entry: &ScheduleEntry) -> Self {
        Self {
            path: entry.path.clone(),
            pid: entry.pid,
            priority: entry.priority,
            size: entry.size,
            num_bursts: entry.num_bursts,
            burst_secs: entry.burst_time.as_secs_f64(),
            turnaround_secs: entry.turnaround.unwrap_or(Duration::ZERO).as_secs_f64(),
            waiting_secs: entry.waiting.unwrap_or(Duration::ZERO).as_secs_f64(),
            terminated: entry.terminated,
        }
    }
}

/// Whole-run report: per-entry rows plus the aggregate figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunSummary {
    pub policy: SchedulingPolicy,
    pub total_processes: usize,
    pub terminated: usize,
    pub failed: usize,
    pub total_burst_secs: f64,
    pub avg_turnaround_secs: f64,
    pub avg_waiting_secs: f64,
    pub entries: Vec<EntryReport>,
}

/// Reduce a finished queue into a report. Pure read side: never mutates
/// scheduling state. Averages divide by the entry count supplied at run
/// start, not by how many completed.
pub fn summarize(queue: &ReadyQueue, policy: SchedulingPolicy, state: RunState) -> RunSummary {
    let entries: Vec<EntryReport> = queue
        .order()
        .into_iter()
        .map(|idx| EntryReport::from_entry(queue.entry(idx)))
        .collect();

    let total_burst_secs = entries.iter().map(|e| e.burst_secs).sum();
    let (total_turnaround, total_waiting) = entries.iter().fold((0.0, 0.0), |(t, w), e| {
        (t + e.turnaround_secs, w + e.waiting_secs)
    });

    let n = state.total as f64;
    let (avg_turnaround_secs, avg_waiting_secs) = if state.total == 0 {
        (0.0, 0.0)
    } else {
        (total_turnaround / n, total_waiting / n)
    };

    RunSummary {
        policy,
        total_processes: state.total,
        terminated: state.terminated,
        failed: state.failed,
        total_burst_secs,
        avg_turnaround_secs,
        avg_waiting_secs,
        entries,
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DETAILS:")?;
        for entry in &self.entries {
            writeln!(
                f,
                "Program [{}] with PID=[{}] executed for [{}] CPU bursts with total time = [{:.6}]{}",
                entry.path,
                entry.pid,
                entry.num_bursts,
                entry.burst_secs,
                if entry.terminated { "" } else { " (not terminated)" },
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total CPU Burst Time : [{:.6}]", self.total_burst_secs)?;
        writeln!(
            f,
            "Average CPU Turnaround Time : [{:.6}]",
            self.avg_turnaround_secs
        )?;
        writeln!(
            f,
            "Average CPU Waiting Time : [{:.6}]",
            self.avg_waiting_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pcb;
    use pretty_assertions::assert_eq;
    use std::time::Instant;

    fn finished_queue() -> (ReadyQueue, RunState) {
        let pcbs = vec![Pcb::new(2, "./b", 2, 0), Pcb::new(1, "./a", 1, 0)];
        let mut queue = ReadyQueue::from_pcbs(&pcbs);
        let mut state = RunState::new(queue.len());

        for idx in queue.order() {
            let entry = queue.entry_mut(idx);
            entry.burst_time = Duration::from_secs(1);
            entry.num_bursts = 2;
            entry.finalize(Instant::now());
            state.terminated += 1;
            state.bursts_granted += 2;
        }
        (queue, state)
    }

    #[test]
    fn test_summarize_aggregates() {
        let (queue, state) = finished_queue();
        let summary = summarize(&queue, SchedulingPolicy::RoundRobin, state);

        assert_eq!(summary.entries.len(), 2);
        assert_eq!(summary.terminated, 2);
        assert!((summary.total_burst_secs - 2.0).abs() < 1e-6);

        // Plain sum-over-N averages.
        let expected_avg: f64 =
            summary.entries.iter().map(|e| e.turnaround_secs).sum::<f64>() / 2.0;
        assert!((summary.avg_turnaround_secs - expected_avg).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_does_not_mutate() {
        let (queue, state) = finished_queue();
        let bursts = |q: &ReadyQueue| -> Vec<u32> {
            q.order().iter().map(|&i| q.entry(i).num_bursts).collect()
        };

        let before = bursts(&queue);
        let _ = summarize(&queue, SchedulingPolicy::Priority, state);
        assert_eq!(bursts(&queue), before);
    }

    #[test]
    fn test_failed_entry_reports_zero_completion_stats() {
        let pcbs = vec![Pcb::new(1, "./a", 1, 0)];
        let mut queue = ReadyQueue::from_pcbs(&pcbs);
        let idx = queue.order()[0];
        queue.entry_mut(idx).failed = true;
        queue.entry_mut(idx).num_bursts = 1;

        let mut state = RunState::new(1);
        state.failed = 1;

        let summary = summarize(&queue, SchedulingPolicy::RoundRobin, state);
        let row = &summary.entries[0];
        assert!(!row.terminated);
        assert_eq!(row.turnaround_secs, 0.0);
        assert_eq!(row.waiting_secs, 0.0);
    }

    #[test]
    fn test_empty_run_has_zero_averages() {
        let queue = ReadyQueue::from_pcbs(&[]);
        let summary = summarize(&queue, SchedulingPolicy::Priority, RunState::new(0));
        assert_eq!(summary.avg_turnaround_secs, 0.0);
        assert_eq!(summary.avg_waiting_secs, 0.0);
    }

    #[test]
    fn test_json_shape() {
        let (queue, state) = finished_queue();
        let summary = summarize(&queue, SchedulingPolicy::ShortestJobFirst, state);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["policy"], "shortest_job_first");
        assert_eq!(json["entries"].as_array().unwrap().len(), 2);
        assert!(json["entries"][0]["burst_secs"].is_f64());
    }
}
