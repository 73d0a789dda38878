// SQLite HostRepository Implementation

use async_trait::async_trait;
use pingpoll_core::domain::HostRecord;
use pingpoll_core::error::Result;
use pingpoll_core::port::HostRepository;
use sqlx::SqlitePool;

use crate::error::map_sqlx_error;

/// Reads the externally managed `hosts` table (needs `id` and `hostname`)
pub struct SqliteHostRepository {
    pool: SqlitePool,
}

impl SqliteHostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HostRepository for SqliteHostRepository {
    async fn list_all(&self) -> Result<Vec<HostRecord>> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, hostname FROM hosts WHERE hostname IS NOT NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, hostname)| HostRecord { id, hostname })
            .collect())
    }
}
