// Central Error Type for the Application

use thiserror::Error;

/// Hint printed when the prober fails with a system call error (status 4)
pub const CAPABILITY_REMEDIATION: &str =
    "make sure fping has the right permissions (i.e. try \"sudo setcap cap_net_raw+ep `which fping`\" on linux)";

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("fping was not found: {0}")]
    ProbeUnavailable(String),

    #[error("fping returned with an error: {cause} (exit status {status})")]
    ProbeExecution { status: i32, cause: String },

    #[error("Conflicting options: {0}")]
    ConfigConflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid database: {0}")]
    InvalidDatabase(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Operator guidance attached to an error, if any
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            AppError::ProbeExecution { status: 4, .. } => Some(CAPABILITY_REMEDIATION),
            AppError::ProbeUnavailable(_) => {
                Some("install fping first and make sure it is executable and in $PATH")
            }
            _ => None,
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by mapping SQLite result codes onto AppError variants
