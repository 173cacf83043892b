/*!
 * Scheduling Policy
 * Policy selection and time-quantum configuration
 */

use super::sort::SortKey;
use crate::core::{SchedError, SchedResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// Scheduling discipline driving a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingPolicy {
    /// Round-robin with a fixed time quantum (preemptive).
    RoundRobin,
    /// Priority order, run to completion (non-preemptive).
    Priority,
    /// Shortest job first, run to completion (non-preemptive).
    ShortestJobFirst,
}

impl SchedulingPolicy {
    /// Parse from string representation.
    pub fn parse(s: &str) -> SchedResult<Self> {
        match s.to_lowercase().as_str() {
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            "priority" | "prio" => Ok(Self::Priority),
            "shortest_job_first" | "sjf" => Ok(Self::ShortestJobFirst),
            _ => Err(SchedError::InvalidPolicy(format!(
                "'{}'. Valid: rr, priority, sjf",
                s
            ))),
        }
    }

    /// Convert to string representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin => "round_robin",
            Self::Priority => "priority",
            Self::ShortestJobFirst => "shortest_job_first",
        }
    }

    /// Sort key for the run-to-completion disciplines; round-robin keeps
    /// construction order and never sorts.
    pub fn sort_key(&self) -> Option<SortKey> {
        match self {
            Self::RoundRobin => None,
            Self::Priority => Some(SortKey::Priority),
            Self::ShortestJobFirst => Some(SortKey::Size),
        }
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Validated time quantum for round-robin dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeQuantum {
    micros: u64,
}

impl TimeQuantum {
    pub const MIN_MICROS: u64 = 1_000;
    pub const MAX_MICROS: u64 = 10_000_000;
    pub const DEFAULT_MICROS: u64 = 500_000;

    /// Create a quantum, rejecting values outside 1 ms ..= 10 s.
    pub fn new(micros: u64) -> SchedResult<Self> {
        if !(Self::MIN_MICROS..=Self::MAX_MICROS).contains(&micros) {
            return Err(SchedError::InvalidQuantum(format!(
                "{}μs must be between 1ms and 10s",
                micros
            )));
        }
        Ok(Self { micros })
    }

    pub fn from_millis(millis: u64) -> SchedResult<Self> {
        Self::new(millis.saturating_mul(1_000))
    }

    pub const fn as_micros(&self) -> u64 {
        self.micros
    }

    pub const fn as_duration(&self) -> Duration {
        Duration::from_micros(self.micros)
    }
}

impl Default for TimeQuantum {
    fn default() -> Self {
        Self {
            micros: Self::DEFAULT_MICROS,
        }
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Inner {
            micros: u64,
        }

        let inner = Inner::deserialize(deserializer)?;
        Self::new(inner.micros).map_err(serde::de::Error::custom)
    }
}
