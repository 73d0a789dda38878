// Record Use Case - append check results to the time series store

use crate::domain::host::host_id_lookup;
use crate::domain::{HostRecord, ProbeResult, TimeSeriesEntry};
use crate::error::Result;
use crate::port::{Maintenance, TimeSeriesStore};
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of one append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    pub written: usize,
    /// Results whose hostname is not registered in `hosts`
    pub skipped: usize,
}

/// Map results onto time series rows; unregistered hosts are dropped
pub fn build_entries(results: &[ProbeResult], hosts: &[HostRecord]) -> Vec<TimeSeriesEntry> {
    let lookup = host_id_lookup(hosts);

    results
        .iter()
        .filter_map(|result| match lookup.get(result.host.as_str()) {
            Some(&host_id) => Some(TimeSeriesEntry::from_result(result, host_id)),
            None => {
                debug!(host = %result.host, "Host not registered, not persisting");
                None
            }
        })
        .collect()
}

/// Result Store Writer
pub struct ResultRecorder {
    store: Arc<dyn TimeSeriesStore>,
    maintenance: Option<Arc<dyn Maintenance>>,
}

impl ResultRecorder {
    pub fn new(store: Arc<dyn TimeSeriesStore>) -> Self {
        Self {
            store,
            maintenance: None,
        }
    }

    /// Run VACUUM / optimize after each successful append
    pub fn with_maintenance(mut self, maintenance: Arc<dyn Maintenance>) -> Self {
        self.maintenance = Some(maintenance);
        self
    }

    /// Append all results of one batch in a single transaction
    ///
    /// # Arguments
    ///
    /// * `results` - Reconciled results of one check
    /// * `hosts` - Registered hosts used to resolve `host_id`
    pub async fn record(
        &self,
        results: &[ProbeResult],
        hosts: &[HostRecord],
    ) -> Result<RecordOutcome> {
        let entries = build_entries(results, hosts);

        self.store.ensure_schema().await?;

        // Dropping the transaction on an early return rolls it back
        let mut tx = self.store.begin_transaction().await?;
        for entry in &entries {
            tx.insert(entry).await?;
        }
        tx.commit().await?;

        let outcome = RecordOutcome {
            written: entries.len(),
            skipped: results.len() - entries.len(),
        };
        info!(
            written = outcome.written,
            skipped = outcome.skipped,
            "Results appended"
        );

        if let Some(maintenance) = &self.maintenance {
            maintenance.run_best_effort().await;
        }

        Ok(outcome)
    }
}
