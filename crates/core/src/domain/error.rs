// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid timeout: {0} ms (must be a positive integer)")]
    InvalidTimeout(u32),

    #[error("Unknown reachability token: {0}")]
    UnknownReachability(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
