// Domain Layer - Pure types for one host check batch

pub mod error;
pub mod host;
pub mod probe;
pub mod reachability;
pub mod warning;

// Re-exports
pub use error::DomainError;
pub use host::{HostRecord, Hostname, TimeSeriesEntry};
pub use probe::{ProbeExit, ProbeObservation, ProbeOptions, ProbeOutput, ProbeResult};
pub use reachability::Reachability;
pub use warning::CheckWarning;
