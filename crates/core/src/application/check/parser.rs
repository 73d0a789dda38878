// fping output parser

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::{ProbeObservation, Reachability};

/// `<host> is alive|unreachable`, optionally followed by ` (<float> ms)` under `-e`
fn status_line() -> &'static Regex {
    static STATUS_LINE: OnceLock<Regex> = OnceLock::new();
    STATUS_LINE.get_or_init(|| {
        Regex::new(
            r"^(?P<host>\S+) is (?P<status>alive|unreachable)(?: \((?P<latency>\d+(?:\.\d+)?) ms\))?",
        )
        .expect("failed to compile status line regex")
    })
}

/// Parse prober stdout into observations, preserving the prober's order
///
/// Lines that do not look like a status line are skipped. Latency is only
/// read when `capture_latency` is set and the host is alive; otherwise it is
/// `None`, never zero.
pub fn parse_probe_output(stdout: &str, capture_latency: bool) -> Vec<ProbeObservation> {
    stdout
        .lines()
        .filter_map(|line| parse_line(line.trim(), capture_latency))
        .collect()
}

fn parse_line(line: &str, capture_latency: bool) -> Option<ProbeObservation> {
    let caps = status_line().captures(line)?;
    let reachability: Reachability = caps["status"].parse().ok()?;

    let latency_ms = if capture_latency && reachability.is_reachable() {
        caps.name("latency")
            .and_then(|m| m.as_str().parse::<f64>().ok())
    } else {
        None
    };

    Some(ProbeObservation {
        host: caps["host"].to_string(),
        reachability,
        latency_ms,
    })
}
