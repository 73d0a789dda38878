// SQLite TimeSeriesStore Implementation

use async_trait::async_trait;
use pingpoll_core::domain::TimeSeriesEntry;
use pingpoll_core::error::Result;
use pingpoll_core::port::{TimeSeriesStore, TimeSeriesTransaction};
use sqlx::SqlitePool;

use crate::error::map_sqlx_error;
use crate::{ensure_time_series_table, SqliteTimeSeriesTransaction};

pub struct SqliteTimeSeriesStore {
    pool: SqlitePool,
}

impl SqliteTimeSeriesStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeSeriesStore for SqliteTimeSeriesStore {
    async fn ensure_schema(&self) -> Result<()> {
        ensure_time_series_table(&self.pool).await?;
        Ok(())
    }

    async fn begin_transaction(&self) -> Result<Box<dyn TimeSeriesTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteTimeSeriesTransaction::new(tx)))
    }

    async fn find_by_timestamp(&self, timestamp: i64) -> Result<Vec<TimeSeriesEntry>> {
        let rows = sqlx::query_as::<_, TimeSeriesRow>(
            "SELECT timestamp, host_id, online, latency_ms FROM ts WHERE timestamp = ? ORDER BY rowid",
        )
        .bind(timestamp)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(TimeSeriesRow::into_entry).collect())
    }
}

/// SQLite row representation of `ts`
#[derive(Debug, sqlx::FromRow)]
struct TimeSeriesRow {
    timestamp: i64,
    host_id: i64,
    online: Option<i64>,
    latency_ms: Option<f64>,
}

impl TimeSeriesRow {
    fn into_entry(self) -> TimeSeriesEntry {
        TimeSeriesEntry {
            timestamp: self.timestamp,
            host_id: self.host_id,
            online: self.online,
            latency_ms: self.latency_ms,
        }
    }
}
