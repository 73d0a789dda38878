// DB Maintenance port
use crate::error::Result;
use async_trait::async_trait;
use tracing::{info, warn};

/// Database maintenance statistics
#[derive(Debug, Clone, Default)]
pub struct MaintenanceStats {
    pub vacuumed: bool,
    pub reclaimed_mb: f64,
    pub optimized: bool,
}

/// Database maintenance operations
#[async_trait]
pub trait Maintenance: Send + Sync {
    /// Run VACUUM to reclaim space
    ///
    /// # Returns
    /// Space reclaimed in MB
    async fn vacuum(&self) -> Result<f64>;

    /// Refresh query planner statistics (`PRAGMA optimize`)
    async fn optimize(&self) -> Result<()>;

    /// Run VACUUM + optimize, logging failures instead of returning them
    ///
    /// Used after an append: the rows are already committed, so maintenance
    /// problems must not fail the run.
    async fn run_best_effort(&self) -> MaintenanceStats {
        let mut stats = MaintenanceStats::default();

        match self.vacuum().await {
            Ok(reclaimed_mb) => {
                stats.vacuumed = true;
                stats.reclaimed_mb = reclaimed_mb;
            }
            Err(e) => warn!(error = %e, "VACUUM failed, continuing"),
        }

        match self.optimize().await {
            Ok(()) => stats.optimized = true,
            Err(e) => warn!(error = %e, "PRAGMA optimize failed, continuing"),
        }

        info!(
            vacuumed = stats.vacuumed,
            reclaimed_mb = stats.reclaimed_mb,
            optimized = stats.optimized,
            "Maintenance completed"
        );

        stats
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls; optionally fails every operation
    #[derive(Default)]
    pub struct MockMaintenance {
        fail: bool,
        calls: AtomicUsize,
    }

    impl MockMaintenance {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn new_failing() -> Self {
            Self {
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn outcome(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::Database("database is locked".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl Maintenance for MockMaintenance {
        async fn vacuum(&self) -> Result<f64> {
            self.outcome().map(|_| 0.0)
        }

        async fn optimize(&self) -> Result<()> {
            self.outcome()
        }
    }
}
