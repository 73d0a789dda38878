// Host Repository Port (Interface)

use crate::domain::HostRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Read-only access to the externally managed `hosts` table
#[async_trait]
pub trait HostRepository: Send + Sync {
    /// All registered hosts, ordered by id
    async fn list_all(&self) -> Result<Vec<HostRecord>>;
}
