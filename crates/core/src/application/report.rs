// Batch summary

use crate::domain::{ProbeResult, Reachability};
use std::fmt;
use std::time::Duration;

/// Aggregate view of one check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckSummary {
    pub up: usize,
    /// Unreachable plus unknown
    pub down: usize,
    pub elapsed: Duration,
}

impl CheckSummary {
    pub fn from_results(results: &[ProbeResult], elapsed: Duration) -> Self {
        let up = results
            .iter()
            .filter(|r| r.reachability == Reachability::Reachable)
            .count();

        Self {
            up,
            down: results.len() - up,
            elapsed,
        }
    }
}

impl fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hosts are up, {} are down (took {:.1} s)",
            self.up,
            self.down,
            self.elapsed.as_secs_f64()
        )
    }
}
