// Schema setup (create-if-absent, never altered)

use pingpoll_core::error::Result;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::map_sqlx_error;

/// Destination table for check results
pub const TIME_SERIES_TABLE: &str = "ts";

pub const TIME_SERIES_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS ts (
timestamp INTEGER NOT NULL,
host_id INTEGER NOT NULL,
online INTEGER CHECK (online IN (0, 1)),
latency_ms REAL,
FOREIGN KEY(host_id) REFERENCES hosts(id) ON DELETE SET NULL ON UPDATE CASCADE
)";

/// Smallest `hosts` table the store can read; the real table is managed elsewhere
pub const HOSTS_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS hosts (
id INTEGER PRIMARY KEY,
hostname TEXT NOT NULL
)";

/// Create the `ts` table if it does not exist
///
/// # Returns
/// `true` if the table was created by this call
pub async fn ensure_time_series_table(pool: &SqlitePool) -> Result<bool> {
    let table_exists: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?")
            .bind(TIME_SERIES_TABLE)
            .fetch_one(pool)
            .await
            .map_err(map_sqlx_error)?;

    if table_exists > 0 {
        return Ok(false);
    }

    info!(table = TIME_SERIES_TABLE, "Creating time series table");
    sqlx::query(TIME_SERIES_SCHEMA)
        .execute(pool)
        .await
        .map_err(map_sqlx_error)?;

    Ok(true)
}
