// Host & Time Series Domain Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::probe::ProbeResult;

/// Hostname or IP address exactly as supplied by the caller
pub type Hostname = String;

/// Row of the externally managed `hosts` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub id: i64,
    pub hostname: Hostname,
}

/// Row appended to the `ts` table
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesEntry {
    pub timestamp: i64,
    pub host_id: i64,
    /// 1 = online, 0 = offline, NULL = unknown
    pub online: Option<i64>,
    pub latency_ms: Option<f64>,
}

impl TimeSeriesEntry {
    pub fn from_result(result: &ProbeResult, host_id: i64) -> Self {
        Self {
            timestamp: result.timestamp,
            host_id,
            online: result.reachability.as_online(),
            latency_ms: result.latency_ms,
        }
    }
}

/// Builds a hostname -> id lookup; the first record wins for repeated hostnames
pub fn host_id_lookup(records: &[HostRecord]) -> HashMap<&str, i64> {
    let mut lookup = HashMap::with_capacity(records.len());
    for record in records {
        lookup.entry(record.hostname.as_str()).or_insert(record.id);
    }
    lookup
}
