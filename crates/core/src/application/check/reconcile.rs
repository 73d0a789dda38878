// Reconciliation of probe output against the requested host list

use std::collections::HashSet;
use tracing::debug;

use crate::domain::{CheckWarning, Hostname, ProbeObservation, ProbeResult};

/// How hosts without a probe record are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcilePolicy {
    pub keep_unresolved: bool,
    pub reverse_lookup: bool,
}

impl ReconcilePolicy {
    /// Reverse lookup replaces names in the output, so missing hosts cannot
    /// be identified and keep-unresolved is demoted
    pub fn is_conflicting(&self) -> bool {
        self.keep_unresolved && self.reverse_lookup
    }

    pub fn effective_keep_unresolved(&self) -> bool {
        self.keep_unresolved && !self.reverse_lookup
    }
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Resolved results in prober order, then unknown placeholders in request order
    pub results: Vec<ProbeResult>,
    /// Distinct requested hosts without a probe record
    pub missing: usize,
    /// Whether missing hosts were added as unknown placeholders
    pub kept_unresolved: bool,
}

impl Reconciliation {
    pub fn warning(&self) -> Option<CheckWarning> {
        (self.missing > 0).then_some(CheckWarning::PartialResolution {
            count: self.missing,
            kept: self.kept_unresolved,
        })
    }
}

/// Number of surplus entries in `hosts` (total minus distinct)
pub fn count_duplicates(hosts: &[Hostname]) -> usize {
    let distinct: HashSet<&str> = hosts.iter().map(String::as_str).collect();
    hosts.len() - distinct.len()
}

/// Align observations with the requested hosts
///
/// Missing hosts are a set difference: a host requested twice and reported
/// once is not missing, and a host requested twice and never reported counts
/// once.
pub fn reconcile(
    requested: &[Hostname],
    observations: Vec<ProbeObservation>,
    timestamp: i64,
    policy: ReconcilePolicy,
) -> Reconciliation {
    let requested_set: HashSet<&str> = requested.iter().map(String::as_str).collect();

    if policy.reverse_lookup {
        // Reported names are reverse-resolved and several addresses may share
        // one name, so every record is kept and only the count is compared
        let results: Vec<ProbeResult> = observations
            .into_iter()
            .map(|observation| ProbeResult::from_observation(observation, timestamp))
            .collect();
        return Reconciliation {
            missing: requested_set.len().saturating_sub(results.len()),
            results,
            kept_unresolved: false,
        };
    }

    let mut seen: HashSet<Hostname> = HashSet::with_capacity(observations.len());
    let mut results = Vec::with_capacity(requested_set.len());

    for observation in observations {
        if !requested_set.contains(observation.host.as_str()) {
            debug!(host = %observation.host, "Dropping result for a host that was not requested");
            continue;
        }
        if !seen.insert(observation.host.clone()) {
            debug!(host = %observation.host, "Dropping repeated result");
            continue;
        }
        results.push(ProbeResult::from_observation(observation, timestamp));
    }

    let mut missing_hosts: Vec<&str> = Vec::new();
    let mut listed: HashSet<&str> = HashSet::new();
    for host in requested {
        if !seen.contains(host.as_str()) && listed.insert(host.as_str()) {
            missing_hosts.push(host.as_str());
        }
    }

    let kept_unresolved = policy.effective_keep_unresolved();
    if kept_unresolved {
        results.extend(
            missing_hosts
                .iter()
                .map(|host| ProbeResult::unknown(*host, timestamp)),
        );
    }

    Reconciliation {
        results,
        missing: missing_hosts.len(),
        kept_unresolved,
    }
}
