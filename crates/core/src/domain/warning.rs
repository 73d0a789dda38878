// Non-fatal conditions surfaced to the operator

use std::fmt;

/// Warning raised while checking a batch of hosts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckWarning {
    /// The request contained `count` surplus entries
    DuplicateHosts { count: usize },
    /// Reverse lookup and keep-unresolved were both requested
    ConflictingOptions,
    /// `count` hosts produced no probe record; `kept` tells whether they were
    /// added as unknown placeholders or dropped
    PartialResolution { count: usize, kept: bool },
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl fmt::Display for CheckWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckWarning::DuplicateHosts { count } => write!(
                f,
                "{} host{} duplicated, make sure to include each host only once",
                count,
                if *count == 1 { " is" } else { "s are" }
            ),
            CheckWarning::ConflictingOptions => write!(
                f,
                "reverse lookup and keeping unresolved hosts are mutually exclusive; \
                 hosts with failed DNS lookup are not included in the result"
            ),
            CheckWarning::PartialResolution { count, kept: false } => write!(
                f,
                "fping did not return a result for {} host{}",
                count,
                plural(*count)
            ),
            CheckWarning::PartialResolution { count, kept: true } => write!(
                f,
                "fping did not return a result for {} host{}, recorded as unknown",
                count,
                plural(*count)
            ),
        }
    }
}
