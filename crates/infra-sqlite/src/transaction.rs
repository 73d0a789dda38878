// SQLite Transaction Implementation

use async_trait::async_trait;
use pingpoll_core::domain::TimeSeriesEntry;
use pingpoll_core::error::Result;
use pingpoll_core::port::{TimeSeriesTransaction, Transaction};
use sqlx::{Sqlite, Transaction as SqlxTransaction};

use crate::error::map_sqlx_error;

pub struct SqliteTimeSeriesTransaction<'a> {
    tx: SqlxTransaction<'a, Sqlite>,
}

impl<'a> SqliteTimeSeriesTransaction<'a> {
    pub fn new(tx: SqlxTransaction<'a, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteTimeSeriesTransaction<'_> {
    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl TimeSeriesTransaction for SqliteTimeSeriesTransaction<'_> {
    async fn insert(&mut self, entry: &TimeSeriesEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ts (timestamp, host_id, online, latency_ms)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(entry.timestamp)
        .bind(entry.host_id)
        .bind(entry.online)
        .bind(entry.latency_ms)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}
