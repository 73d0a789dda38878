//! pingpoll CLI - check which hosts of a list are reachable
//! Results can be printed, exported to CSV, or appended to a SQLite store

mod console;
mod export;
mod hosts;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use pingpoll_core::application::{CheckOptions, CheckSummary, HostCheckService, ResultRecorder};
use pingpoll_core::domain::probe::DEFAULT_TIMEOUT_MS;
use pingpoll_core::domain::{HostRecord, Hostname, ProbeOptions, ProbeResult};
use pingpoll_core::port::time_provider::SystemTimeProvider;
use pingpoll_core::port::{HostRepository, Reporter, TimeProvider};
use pingpoll_core::AppError;
use pingpoll_infra_sqlite::{
    open_existing, SqliteHostRepository, SqliteMaintenance, SqlitePool, SqliteTimeSeriesStore,
};
use pingpoll_infra_system::fping_runner::DEFAULT_PROGRAM;
use pingpoll_infra_system::FpingRunner;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use console::{print_error, ConsoleReporter};

const DEFAULT_LOG_FILTER: &str = "pingpoll=warn";

const HOSTS_ENV: &str = "PINGPOLL_HOSTS";

#[derive(Parser, Debug)]
#[command(name = "pingpoll")]
#[command(about = "Pings a list of hosts to check if they are online", long_about = None)]
#[command(version)]
struct Cli {
    /// Text files with hosts to ping, one hostname or IP address per line
    /// (falls back to PINGPOLL_HOSTS, separated like $PATH)
    hosts: Vec<String>,

    /// Ping timeout in milliseconds
    #[arg(short, long, env = "PINGPOLL_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout: u32,

    /// Record elapsed time in milliseconds (ping latency)
    #[arg(short, long, env = "PINGPOLL_ELAPSED")]
    elapsed: bool,

    /// Do not include hosts with failed DNS resolution in the result
    #[arg(short = 'f', long, env = "PINGPOLL_EXCLUDE_FAILED")]
    exclude_failed: bool,

    /// Use reverse DNS lookup on provided IPs and hostnames
    #[arg(short, long, env = "PINGPOLL_REVERSE")]
    reverse: bool,

    /// Also resolve IPv6 addresses (only IPv4 by default)
    #[arg(short = '6', long, env = "PINGPOLL_IPV6")]
    ipv6: bool,

    /// Show a summary after completion (default unless --table or --json is set)
    #[arg(short, long, env = "PINGPOLL_SUMMARY")]
    summary: bool,

    /// Print a table with all results
    #[arg(short = 'v', long, env = "PINGPOLL_TABLE")]
    table: bool,

    /// Print all results as a JSON array
    #[arg(long, env = "PINGPOLL_JSON")]
    json: bool,

    /// CSV output file, overwritten unless --append is set
    #[arg(short, long, env = "PINGPOLL_CSV")]
    csv: Option<String>,

    /// Append to an existing CSV file without header
    #[arg(short, long, env = "PINGPOLL_APPEND", requires = "csv")]
    append: bool,

    /// SQLite database; hosts are read from table `hosts`, results appended to `ts`
    #[arg(short = 'q', long, env = "PINGPOLL_SQLITE")]
    sqlite: Option<String>,

    /// fping executable (name on $PATH or a path)
    #[arg(long, env = "PINGPOLL_FPING", default_value = DEFAULT_PROGRAM)]
    fping: String,
}

impl Cli {
    fn check_options(&self) -> CheckOptions {
        CheckOptions {
            probe: ProbeOptions {
                timeout_ms: Some(self.timeout),
                reverse_lookup: self.reverse,
                capture_latency: self.elapsed,
                ipv4_only: !self.ipv6,
            },
            keep_unresolved: !self.exclude_failed,
        }
    }

    fn host_files(&self) -> Vec<PathBuf> {
        host_files_from(&self.hosts, std::env::var_os(HOSTS_ENV))
    }

    fn show_summary(&self) -> bool {
        self.summary || !(self.table || self.json)
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Positional host files, or else the `$PATH`-style list from the environment
fn host_files_from(args: &[String], env: Option<OsString>) -> Vec<PathBuf> {
    if !args.is_empty() {
        return args.iter().map(|p| expand_path(p)).collect();
    }
    env.map(|value| {
        std::env::split_paths(&value)
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| expand_path(&p.to_string_lossy()))
            .collect()
    })
    .unwrap_or_default()
}

fn init_logging() {
    let log_format = std::env::var("PINGPOLL_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stdout is reserved for reports
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Hosts to check, plus the registered records when reading from the store
async fn collect_hosts(
    host_files: &[PathBuf],
    pool: Option<&SqlitePool>,
) -> Result<(Vec<Hostname>, Vec<HostRecord>)> {
    match pool {
        Some(pool) => {
            let records = SqliteHostRepository::new(pool.clone())
                .list_all()
                .await
                .context("Failed to read table `hosts`")?;
            let hosts = records.iter().map(|r| r.hostname.clone()).collect();
            Ok((hosts, records))
        }
        None => {
            Ok((hosts::read_host_files(host_files)?, Vec::new()))
        }
    }
}

fn print_results(
    cli: &Cli,
    reporter: &dyn Reporter,
    results: &[ProbeResult],
    summary: &CheckSummary,
) -> Result<()> {
    if cli.table {
        reporter.line(&report::render_table(results, cli.elapsed));
    }
    if cli.json {
        reporter.line(&report::render_json(results)?);
    }
    if cli.show_summary() {
        reporter.line(&report::render_summary(summary, chrono::Local::now()));
    }
    Ok(())
}

async fn check_and_store(
    cli: &Cli,
    host_files: &[PathBuf],
    pool: Option<&SqlitePool>,
) -> Result<()> {
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter);

    let (hosts, records) = collect_hosts(host_files, pool).await?;
    debug!(hosts = hosts.len(), "Hosts collected");

    let runner = Arc::new(FpingRunner::with_program(
        expand_path(&cli.fping).to_string_lossy().into_owned(),
        time_provider.clone(),
    ));
    let service = HostCheckService::new(runner, time_provider, reporter.clone());

    let start = Instant::now();
    let results = service.check_hosts(&hosts, &cli.check_options()).await?;
    let summary = CheckSummary::from_results(&results, start.elapsed());

    print_results(cli, reporter.as_ref(), &results, &summary)?;

    if let Some(pool) = pool {
        let recorder = ResultRecorder::new(Arc::new(SqliteTimeSeriesStore::new(pool.clone())))
            .with_maintenance(Arc::new(SqliteMaintenance::new(pool.clone())));
        recorder
            .record(&results, &records)
            .await
            .context("Failed to store results")?;
    }

    if let Some(csv) = &cli.csv {
        let path = expand_path(csv);
        export::export_csv(&path, &results, cli.elapsed, cli.append)?;
        let mode = if cli.append { " in append mode" } else { "" };
        reporter.line(&format!(
            "{} Saved table to {}{}",
            "✓".green(),
            path.display().to_string().bold().underline(),
            mode
        ));
    }

    info!(up = summary.up, down = summary.down, "Run finished");
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let host_files = cli.host_files();

    let pool = match &cli.sqlite {
        Some(_) if !host_files.is_empty() => {
            return Err(AppError::ConfigConflict(
                "must not pass additional hosts if the --sqlite option is used".to_string(),
            )
            .into());
        }
        Some(path) => {
            let path = expand_path(path);
            let pool = open_existing(&path)
                .await
                .with_context(|| format!("Cannot use {} as SQLite store", path.display()))?;
            Some(pool)
        }
        None if host_files.is_empty() => {
            return Err(AppError::Validation(
                "no hosts given, pass host files or the --sqlite option".to_string(),
            )
            .into());
        }
        None => None,
    };

    let result = check_and_store(&cli, &host_files, pool.as_ref()).await;

    if let Some(pool) = pool {
        pool.close().await;
    }
    result
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pingpoll_core::port::probe_runner::mocks::MockProbeRunner;
    use pingpoll_core::port::reporter::mocks::RecordingReporter;
    use pingpoll_core::port::time_provider::mocks::FixedTimeProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts events that pass the filters in front of it
    #[derive(Clone, Default)]
    struct EventCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCounter {
        fn on_event(
            &self,
            _event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_check_warnings_are_not_logged_at_default_level() {
        let counter = EventCounter::default();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(DEFAULT_LOG_FILTER))
            .with(counter.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let reporter = Arc::new(RecordingReporter::new());
        let service = HostCheckService::new(
            Arc::new(MockProbeRunner::with_stdout("a is alive\n")),
            Arc::new(FixedTimeProvider::from_secs(1)),
            reporter.clone(),
        );
        let options = CheckOptions {
            keep_unresolved: false,
            ..Default::default()
        };
        service
            .check_hosts(&["a".to_string(), "b".to_string()], &options)
            .await
            .unwrap();

        assert_eq!(reporter.warnings().len(), 1);
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_host_file_path_with_comma_is_one_file() {
        let cli = Cli::try_parse_from(["pingpoll", "lab,north.txt"]).unwrap();

        assert_eq!(cli.hosts, vec!["lab,north.txt"]);
        assert_eq!(
            host_files_from(&cli.hosts, None),
            vec![PathBuf::from("lab,north.txt")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_host_files_from_environment() {
        let files = host_files_from(&[], Some(OsString::from("a.txt:b,c.txt")));
        assert_eq!(files, vec![PathBuf::from("a.txt"), PathBuf::from("b,c.txt")]);

        let args = vec!["cli.txt".to_string()];
        let files = host_files_from(&args, Some(OsString::from("env.txt")));
        assert_eq!(files, vec![PathBuf::from("cli.txt")]);

        assert!(host_files_from(&[], None).is_empty());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pingpoll", "hosts.txt"]).unwrap();
        let options = cli.check_options();

        assert_eq!(options.probe, ProbeOptions::default());
        assert!(options.keep_unresolved);
        assert!(cli.show_summary());
        assert_eq!(cli.fping, DEFAULT_PROGRAM);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "pingpoll", "-t", "200", "-e", "-f", "-r", "-6", "-v", "-c", "out.csv", "-a", "a.txt",
            "b.txt",
        ])
        .unwrap();
        let options = cli.check_options();

        assert_eq!(options.probe.timeout_ms, Some(200));
        assert!(options.probe.capture_latency);
        assert!(options.probe.reverse_lookup);
        assert!(!options.probe.ipv4_only);
        assert!(!options.keep_unresolved);
        assert!(!cli.show_summary());
        assert_eq!(cli.hosts, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_append_requires_csv() {
        assert!(Cli::try_parse_from(["pingpoll", "-a", "hosts.txt"]).is_err());
    }

    #[tokio::test]
    async fn test_sqlite_with_host_files_conflicts() {
        let cli = Cli::try_parse_from(["pingpoll", "-q", "poll.db", "hosts.txt"]).unwrap();

        let err = run(cli).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::ConfigConflict(_))
        ));
    }

    #[tokio::test]
    async fn test_no_host_source_is_rejected() {
        let cli = Cli::try_parse_from(["pingpoll"]).unwrap();

        let err = run(cli).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_store_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.db");
        std::fs::write(&path, "not a database").unwrap();
        let cli = Cli::try_parse_from(["pingpoll", "-q", path.to_str().unwrap()]).unwrap();

        let err = run(cli).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::InvalidDatabase(_))
        ));
    }
}
