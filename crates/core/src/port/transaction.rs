// Transaction port for atomic operations

use crate::domain::TimeSeriesEntry;
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
///
/// Dropping a transaction without committing rolls it back.
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Time series operations within a transaction
#[async_trait]
pub trait TimeSeriesTransaction: Transaction {
    /// Append one entry (within transaction)
    async fn insert(&mut self, entry: &TimeSeriesEntry) -> Result<()>;
}
