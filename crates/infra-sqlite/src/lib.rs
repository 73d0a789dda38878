// pingpoll Infrastructure - SQLite Adapter
// Implements: HostRepository, TimeSeriesStore, Maintenance

mod connection;
mod error;
mod host_repository;
mod maintenance_impl;
mod schema;
mod time_series_store;
mod transaction;

pub use connection::{create_pool, open_existing, validate_header, SQLITE_HEADER};
pub use host_repository::SqliteHostRepository;
pub use maintenance_impl::SqliteMaintenance;
pub use schema::{ensure_time_series_table, HOSTS_SCHEMA, TIME_SERIES_SCHEMA, TIME_SERIES_TABLE};
pub use time_series_store::SqliteTimeSeriesStore;
pub use transaction::SqliteTimeSeriesTransaction;

pub use sqlx::SqlitePool;

// Note: sqlx::Error conversion is handled by map_sqlx_error
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
