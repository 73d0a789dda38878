// CSV export of a check result set

use anyhow::{Context, Result};
use pingpoll_core::domain::{ProbeResult, Reachability};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Spelling of `reachable` used by files written with earlier tooling
fn reachable_cell(reachability: Reachability) -> &'static str {
    match reachability {
        Reachability::Reachable => "True",
        Reachability::Unreachable => "False",
        Reachability::Unknown => "",
    }
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Write `results` as CSV rows (`machine,reachable,ts[,ping]`)
pub fn write_csv<W: Write>(
    writer: &mut W,
    results: &[ProbeResult],
    with_latency: bool,
    with_header: bool,
) -> std::io::Result<()> {
    if with_header {
        write!(writer, "machine,reachable,ts")?;
        if with_latency {
            write!(writer, ",ping")?;
        }
        writeln!(writer)?;
    }

    for result in results {
        write!(
            writer,
            "{},{},{}",
            escape(&result.host),
            reachable_cell(result.reachability),
            result.timestamp
        )?;
        if with_latency {
            match result.latency_ms {
                Some(latency) => write!(writer, ",{}", latency)?,
                None => write!(writer, ",")?,
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Export to `path`, truncating it unless `append` is set
///
/// The header is written unless rows are appended to an existing file.
pub fn export_csv(
    path: &Path,
    results: &[ProbeResult],
    with_latency: bool,
    append: bool,
) -> Result<()> {
    let with_header = !(append && path.is_file());

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, results, with_latency, with_header)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
