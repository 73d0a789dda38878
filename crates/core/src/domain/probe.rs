// Probe Domain Model

use serde::{Deserialize, Serialize};

use super::error::{DomainError, Result};
use super::host::Hostname;
use super::reachability::Reachability;

/// Default per-target timeout handed to fping (ms)
pub const DEFAULT_TIMEOUT_MS: u32 = 50;

/// Options that shape a single probe invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOptions {
    /// Per-target timeout in ms; `None` keeps fping's own default
    pub timeout_ms: Option<u32>,
    /// Reverse DNS lookup before probing (`-d`)
    pub reverse_lookup: bool,
    /// Record round-trip latency (`-e`)
    pub capture_latency: bool,
    /// Restrict name resolution to IPv4 (`--ipv4`)
    pub ipv4_only: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout_ms: Some(DEFAULT_TIMEOUT_MS),
            reverse_lookup: false,
            capture_latency: false,
            ipv4_only: true,
        }
    }
}

impl ProbeOptions {
    pub fn validate(&self) -> Result<()> {
        match self.timeout_ms {
            Some(0) => Err(DomainError::InvalidTimeout(0)),
            _ => Ok(()),
        }
    }
}

/// Exit status of the prober, as documented in fping(8) under DIAGNOSTICS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeExit {
    AllReachable,
    SomeUnreachable,
    SomeUnresolved,
    InvalidArguments,
    SystemCallFailure,
    Other(i32),
}

impl ProbeExit {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ProbeExit::AllReachable,
            1 => ProbeExit::SomeUnreachable,
            2 => ProbeExit::SomeUnresolved,
            3 => ProbeExit::InvalidArguments,
            4 => ProbeExit::SystemCallFailure,
            other => ProbeExit::Other(other),
        }
    }

    /// 0, 1 and 2 are normal outcomes; unresolved hosts are handled downstream
    pub fn is_success(self) -> bool {
        matches!(
            self,
            ProbeExit::AllReachable | ProbeExit::SomeUnreachable | ProbeExit::SomeUnresolved
        )
    }

    pub fn description(self) -> &'static str {
        match self {
            ProbeExit::AllReachable => "all hosts are reachable",
            ProbeExit::SomeUnreachable => "some hosts are unreachable",
            ProbeExit::SomeUnresolved => "some IP addresses or hostnames were not found",
            ProbeExit::InvalidArguments => "invalid command line arguments",
            ProbeExit::SystemCallFailure => "system call failure",
            ProbeExit::Other(_) => "unexpected exit status",
        }
    }
}

/// Raw output captured from one prober run
#[derive(Debug, Clone)]
pub struct ProbeOutput {
    pub stdout: String,
    pub exit_code: i32,
}

impl ProbeOutput {
    pub fn exit(&self) -> ProbeExit {
        ProbeExit::from_code(self.exit_code)
    }
}

/// One status line reported by the prober
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeObservation {
    pub host: Hostname,
    pub reachability: Reachability,
    pub latency_ms: Option<f64>,
}

/// Final per-host result of a check batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub host: Hostname,
    pub reachability: Reachability,
    pub latency_ms: Option<f64>,
    /// Batch time in seconds since epoch, shared by every result of a run
    pub timestamp: i64,
}

impl ProbeResult {
    pub fn from_observation(observation: ProbeObservation, timestamp: i64) -> Self {
        Self {
            host: observation.host,
            reachability: observation.reachability,
            latency_ms: observation.latency_ms,
            timestamp,
        }
    }

    /// Placeholder for a host the prober did not report on
    pub fn unknown(host: impl Into<Hostname>, timestamp: i64) -> Self {
        Self {
            host: host.into(),
            reachability: Reachability::Unknown,
            latency_ms: None,
            timestamp,
        }
    }
}
