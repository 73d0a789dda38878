// Time Series Store Port (Interface)

use crate::domain::TimeSeriesEntry;
use crate::error::Result;
use crate::port::TimeSeriesTransaction;
use async_trait::async_trait;

/// Append-only store for check results
#[async_trait]
pub trait TimeSeriesStore: Send + Sync {
    /// Create the destination table if it does not exist (never alters it)
    async fn ensure_schema(&self) -> Result<()>;

    /// Begin a new transaction
    async fn begin_transaction(&self) -> Result<Box<dyn TimeSeriesTransaction>>;

    /// Entries written at the given batch timestamp, in insertion order
    async fn find_by_timestamp(&self, timestamp: i64) -> Result<Vec<TimeSeriesEntry>>;
}
