// Console renderings of a result set

use anyhow::Result;
use chrono::{DateTime, Local};
use colored::Colorize;
use pingpoll_core::application::CheckSummary;
use pingpoll_core::domain::{ProbeResult, Reachability};
use tabled::builder::Builder;
use tabled::settings::Style;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn reachable_cell(reachability: Reachability) -> String {
    match reachability {
        Reachability::Reachable => "yes".green().to_string(),
        Reachability::Unreachable => "no".red().to_string(),
        Reachability::Unknown => "?".dimmed().to_string(),
    }
}

/// One row per host: `machine, reachable, ts[, ping]`
pub fn render_table(results: &[ProbeResult], with_latency: bool) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["machine".to_string(), "reachable".to_string(), "ts".to_string()];
    if with_latency {
        header.push("ping".to_string());
    }
    builder.push_record(header);

    for result in results {
        let mut row = vec![
            result.host.clone(),
            reachable_cell(result.reachability),
            result.timestamp.to_string(),
        ];
        if with_latency {
            row.push(
                result
                    .latency_ms
                    .map(|ms| format!("{:.2}", ms))
                    .unwrap_or_default(),
            );
        }
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// `[YYYY-mm-dd HH:MM:SS] N hosts are up, M are down (took X.Y s)`
pub fn render_summary(summary: &CheckSummary, now: DateTime<Local>) -> String {
    format!(
        "{} {} hosts are up, {} are down {}",
        format!("[{}]", now.format(TIMESTAMP_FORMAT)).dimmed(),
        summary.up.to_string().green().bold(),
        summary.down.to_string().red().bold(),
        format!("(took {:.1} s)", summary.elapsed.as_secs_f64()).dimmed()
    )
}

/// The result set as a pretty-printed JSON array
pub fn render_json(results: &[ProbeResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}
