// SQLite Connection Setup

use pingpoll_core::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::error::map_sqlx_error;

/// First 16 bytes of every SQLite 3 database file
pub const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

/// Wait this long for a lock held by another reader/writer before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(60);

/// One invocation uses one connection
const MAX_CONNECTIONS: u32 = 1;

/// Check that `path` starts with the SQLite 3 header before connecting to it
pub async fn validate_header(path: &Path) -> Result<()> {
    let mut file = tokio::fs::File::open(path).await.map_err(|e| {
        AppError::InvalidDatabase(format!("cannot open {}: {}", path.display(), e))
    })?;

    let mut header = [0u8; 16];
    match file.read_exact(&mut header).await {
        Ok(_) if &header == SQLITE_HEADER => Ok(()),
        _ => Err(AppError::InvalidDatabase(format!(
            "{} is not a SQLite 3 database",
            path.display()
        ))),
    }
}

fn tune(options: SqliteConnectOptions) -> SqliteConnectOptions {
    options.busy_timeout(BUSY_TIMEOUT).foreign_keys(true)
}

async fn connect(options: SqliteConnectOptions) -> Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                // Enforce CHECK (online IN (0, 1)) on every connection
                sqlx::query("PRAGMA ignore_check_constraints = 0")
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .connect_with(options)
        .await
        .map_err(map_sqlx_error)
}

/// Create a pool from a connection URL, creating the database if missing
///
/// Used for fresh databases and `sqlite::memory:` in tests.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(map_sqlx_error)?
        .create_if_missing(true);

    connect(tune(options)).await
}

/// Open an existing database file after validating its header
pub async fn open_existing(path: &Path) -> Result<SqlitePool> {
    validate_header(path).await?;
    debug!(path = %path.display(), "SQLite header validated");

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(false);

    connect(tune(options)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_pool() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        assert!(pool.acquire().await.is_ok());
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_rejects_non_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.txt");
        std::fs::write(&path, "10.0.0.1\n10.0.0.2\n").unwrap();

        let err = open_existing(&path).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidDatabase(_)));
    }

    #[tokio::test]
    async fn test_rejects_missing_and_short_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.db");
        assert!(matches!(
            validate_header(&missing).await,
            Err(AppError::InvalidDatabase(_))
        ));

        let short = dir.path().join("short.db");
        std::fs::write(&short, b"SQLite").unwrap();
        assert!(matches!(
            validate_header(&short).await,
            Err(AppError::InvalidDatabase(_))
        ));
    }

    #[tokio::test]
    async fn test_opens_existing_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poll.db");

        {
            let url = format!("sqlite://{}", path.display());
            let pool = create_pool(&url).await.unwrap();
            sqlx::query("CREATE TABLE t (x INTEGER)")
                .execute(&pool)
                .await
                .unwrap();
            pool.close().await;
        }

        let pool = open_existing(&path).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM t")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
        pool.close().await;
    }
}
