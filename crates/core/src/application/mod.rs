// Application Layer - Use Cases

pub mod check;
pub mod record;
pub mod report;

// Re-exports
pub use check::{CheckOptions, HostCheckService};
pub use record::{RecordOutcome, ResultRecorder};
pub use report::CheckSummary;
