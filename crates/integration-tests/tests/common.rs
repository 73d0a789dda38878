//! Shared fixtures: a file-backed store with registered hosts

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use pingpoll_core::application::{CheckOptions, HostCheckService, ResultRecorder};
use pingpoll_core::domain::{HostRecord, Hostname};
use pingpoll_core::port::probe_runner::mocks::MockProbeRunner;
use pingpoll_core::port::reporter::mocks::RecordingReporter;
use pingpoll_core::port::time_provider::mocks::FixedTimeProvider;
use pingpoll_core::port::{HostRepository, ProbeRunner};
use pingpoll_core::AppError;
use pingpoll_infra_sqlite::{
    create_pool, open_existing, SqliteHostRepository, SqliteMaintenance, SqlitePool,
    SqliteTimeSeriesStore, HOSTS_SCHEMA,
};
use tempfile::TempDir;

pub const BATCH_SECS: i64 = 1_700_000_000;

pub struct Store {
    // Keeps the database file alive
    _dir: TempDir,
    pub path: PathBuf,
    pub pool: SqlitePool,
}

/// Create a store file with `hosts` rows `(1, names[0]), (2, names[1]), ...`
pub async fn store_with_hosts(names: &[&str]) -> Store {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poll.db");

    let setup = create_pool(&format!("sqlite://{}", path.display()))
        .await
        .unwrap();
    sqlx::query(HOSTS_SCHEMA).execute(&setup).await.unwrap();
    for (i, name) in names.iter().enumerate() {
        sqlx::query("INSERT INTO hosts (id, hostname) VALUES (?, ?)")
            .bind(i as i64 + 1)
            .bind(*name)
            .execute(&setup)
            .await
            .unwrap();
    }
    setup.close().await;

    let pool = open_existing(&path).await.unwrap();
    Store {
        _dir: dir,
        path,
        pool,
    }
}

pub fn hosts(names: &[&str]) -> Vec<Hostname> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Outcome of one run of the full pipeline
pub struct Run {
    pub result: pingpoll_core::Result<usize>,
    pub reporter: Arc<RecordingReporter>,
}

/// Read hosts, check them and append the results, like the CLI does
pub async fn run_pipeline(
    store: &Store,
    runner: Arc<dyn ProbeRunner>,
    options: &CheckOptions,
) -> Run {
    let reporter = Arc::new(RecordingReporter::new());
    let service = HostCheckService::new(
        runner,
        Arc::new(FixedTimeProvider::from_secs(BATCH_SECS)),
        reporter.clone(),
    );

    let result = async {
        let records: Vec<HostRecord> = SqliteHostRepository::new(store.pool.clone())
            .list_all()
            .await?;
        let names: Vec<Hostname> = records.iter().map(|r| r.hostname.clone()).collect();

        let results = service.check_hosts(&names, options).await?;

        let recorder =
            ResultRecorder::new(Arc::new(SqliteTimeSeriesStore::new(store.pool.clone())))
                .with_maintenance(Arc::new(SqliteMaintenance::new(store.pool.clone())));
        let outcome = recorder.record(&results, &records).await?;
        Ok::<usize, AppError>(outcome.written)
    }
    .await;

    Run { result, reporter }
}

pub fn mock_runner(stdout: &str) -> Arc<MockProbeRunner> {
    Arc::new(MockProbeRunner::with_stdout(stdout))
}

/// Rows of `ts` as `(timestamp, host_id, online, latency_ms)` in insertion order
pub async fn ts_rows(pool: &SqlitePool) -> Vec<(i64, i64, Option<i64>, Option<f64>)> {
    sqlx::query_as("SELECT timestamp, host_id, online, latency_ms FROM ts ORDER BY rowid")
        .fetch_all(pool)
        .await
        .unwrap()
}

pub async fn ts_exists(pool: &SqlitePool) -> bool {
    let count: i64 =
        sqlx::query_scalar("SELECT count(*) FROM sqlite_master WHERE type='table' AND name='ts'")
            .fetch_one(pool)
            .await
            .unwrap();
    count == 1
}
