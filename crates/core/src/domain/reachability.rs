// Tri-state reachability

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::DomainError;

/// Outcome of probing a single host
///
/// `Unknown` means no determination could be made (e.g. the name did not
/// resolve), which is distinct from an explicit `Unreachable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reachability {
    Reachable,
    Unreachable,
    Unknown,
}

impl Reachability {
    /// Value stored in the `online` column (1 / 0 / NULL)
    pub fn as_online(self) -> Option<i64> {
        match self {
            Reachability::Reachable => Some(1),
            Reachability::Unreachable => Some(0),
            Reachability::Unknown => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        self == Reachability::Reachable
    }
}

/// Parses the prober's status word (`alive` / `unreachable`)
impl FromStr for Reachability {
    type Err = DomainError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "alive" => Ok(Reachability::Reachable),
            "unreachable" => Ok(Reachability::Unreachable),
            other => Err(DomainError::UnknownReachability(other.to_string())),
        }
    }
}

impl std::fmt::Display for Reachability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reachability::Reachable => write!(f, "reachable"),
            Reachability::Unreachable => write!(f, "unreachable"),
            Reachability::Unknown => write!(f, "unknown"),
        }
    }
}
