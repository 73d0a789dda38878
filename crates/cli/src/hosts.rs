// Host sources: plain text files or the `hosts` table of the store

use anyhow::{Context, Result};
use pingpoll_core::domain::Hostname;
use std::path::Path;

/// Hosts listed in one text file
///
/// One host per line; only the first comma-separated field is used. Blank
/// lines and lines starting with `#` are skipped.
pub fn parse_host_list(content: &str) -> Vec<Hostname> {
    content
        .lines()
        .map(|line| line.split(',').next().unwrap_or_default().trim())
        .filter(|host| !host.is_empty() && !host.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Concatenate hosts of all files, in argument order
pub fn read_host_files(paths: &[impl AsRef<Path>]) -> Result<Vec<Hostname>> {
    let mut hosts = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read host file {}", path.display()))?;
        hosts.extend(parse_host_list(&content));
    }
    Ok(hosts)
}
