// Port Layer - Interfaces for external dependencies

pub mod host_repository;
pub mod maintenance;
pub mod probe_runner;
pub mod reporter;
pub mod time_provider; // For deterministic batch timestamps
pub mod time_series_store;
pub mod transaction;

// Re-exports
pub use host_repository::HostRepository;
pub use maintenance::{Maintenance, MaintenanceStats};
pub use probe_runner::ProbeRunner;
pub use reporter::Reporter;
pub use time_provider::TimeProvider;
pub use time_series_store::TimeSeriesStore;
pub use transaction::{TimeSeriesTransaction, Transaction};
