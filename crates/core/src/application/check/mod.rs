// Host Check Service - probe, parse and reconcile one batch of hosts

pub mod parser;
pub mod reconcile;

pub use parser::parse_probe_output;
pub use reconcile::{count_duplicates, reconcile, ReconcilePolicy, Reconciliation};

use crate::domain::{CheckWarning, Hostname, ProbeOptions, ProbeResult};
use crate::error::Result;
use crate::port::{ProbeRunner, Reporter, TimeProvider};
use std::sync::Arc;
use tracing::{debug, info};

/// Options for one check batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub probe: ProbeOptions,
    /// Add hosts the prober did not report on as `Unknown`
    pub keep_unresolved: bool,
}

impl CheckOptions {
    pub fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy {
            keep_unresolved: self.keep_unresolved,
            reverse_lookup: self.probe.reverse_lookup,
        }
    }
}

/// Host Check Service
pub struct HostCheckService {
    runner: Arc<dyn ProbeRunner>,
    time_provider: Arc<dyn TimeProvider>,
    reporter: Arc<dyn Reporter>,
}

impl HostCheckService {
    pub fn new(
        runner: Arc<dyn ProbeRunner>,
        time_provider: Arc<dyn TimeProvider>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            runner,
            time_provider,
            reporter,
        }
    }

    /// The reporter is the operator channel; tracing only keeps a debug trail
    fn emit(&self, warning: CheckWarning) {
        debug!(warning = %warning, "Host check warning");
        self.reporter.warn(&warning);
    }

    /// Check all `hosts` in a single probe run
    ///
    /// Every returned result carries the same batch timestamp, taken once the
    /// prober output has been parsed.
    pub async fn check_hosts(
        &self,
        hosts: &[Hostname],
        options: &CheckOptions,
    ) -> Result<Vec<ProbeResult>> {
        options.probe.validate()?;

        let policy = options.policy();
        if policy.is_conflicting() {
            self.emit(CheckWarning::ConflictingOptions);
        }

        let duplicates = count_duplicates(hosts);
        if duplicates > 0 {
            self.emit(CheckWarning::DuplicateHosts { count: duplicates });
        }

        self.runner.ensure_available().await?;

        if hosts.is_empty() {
            info!("No hosts to check, skipping probe");
            return Ok(Vec::new());
        }

        info!(hosts = hosts.len(), options = ?options.probe, "Probing hosts");
        let output = self.runner.run(hosts, &options.probe).await?;

        let observations = parse_probe_output(&output.stdout, options.probe.capture_latency);
        let timestamp = self.time_provider.now_secs();

        let reconciliation = reconcile(hosts, observations, timestamp, policy);
        if let Some(warning) = reconciliation.warning() {
            self.emit(warning);
        }

        info!(
            results = reconciliation.results.len(),
            missing = reconciliation.missing,
            exit_code = output.exit_code,
            timestamp = timestamp,
            "Host check completed"
        );

        Ok(reconciliation.results)
    }
}
