// fping runner
// reason: tokio for async process management
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, info};

use pingpoll_core::domain::{Hostname, ProbeExit, ProbeOptions, ProbeOutput};
use pingpoll_core::error::{AppError, Result};
use pingpoll_core::port::{ProbeRunner, TimeProvider};

/// Executable looked up on `$PATH` when no other program is configured
pub const DEFAULT_PROGRAM: &str = "fping";

/// Status reported when fping is terminated by a signal
const SIGNALLED_STATUS: i32 = -1;

/// Runs fping once per check and captures its report
pub struct FpingRunner {
    program: String,
    leading_args: Vec<String>,
    time_provider: Arc<dyn TimeProvider>,
}

impl FpingRunner {
    /// Create a runner for `fping` on `$PATH`
    ///
    /// # Example
    /// ```ignore
    /// let runner = FpingRunner::new(Arc::new(SystemTimeProvider));
    /// ```
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self::with_program(DEFAULT_PROGRAM, time_provider)
    }

    /// Use a specific executable (bare name searched on `$PATH`, or a path)
    pub fn with_program(program: impl Into<String>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self::with_command(program, Vec::new(), time_provider)
    }

    /// Use a wrapper command; `leading_args` go before the fping flags
    ///
    /// # Arguments
    /// * `program` - Executable to spawn
    /// * `leading_args` - Arguments placed before flags and hosts
    /// * `time_provider` - Time provider for duration tracking
    pub fn with_command(
        program: impl Into<String>,
        leading_args: Vec<String>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            program: program.into(),
            leading_args,
            time_provider,
        }
    }

    /// Resolve the configured program to an executable file
    fn locate(&self) -> Result<PathBuf> {
        let candidate = Path::new(&self.program);

        if candidate.components().count() > 1 {
            return if is_executable(candidate) {
                Ok(candidate.to_path_buf())
            } else {
                Err(AppError::ProbeUnavailable(format!(
                    "{} is not an executable file",
                    candidate.display()
                )))
            };
        }

        let path_var = std::env::var_os("PATH")
            .ok_or_else(|| AppError::ProbeUnavailable("$PATH is not set".to_string()))?;

        std::env::split_paths(&path_var)
            .map(|dir| dir.join(&self.program))
            .find(|path| is_executable(path))
            .ok_or_else(|| {
                AppError::ProbeUnavailable(format!("{} is not in $PATH", self.program))
            })
    }

    /// Translate options into fping flags
    fn build_args(options: &ProbeOptions) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(timeout_ms) = options.timeout_ms {
            args.push(format!("--timeout={}", timeout_ms));
        }
        if options.reverse_lookup {
            args.push("-d".to_string());
        }
        if options.capture_latency {
            args.push("-e".to_string());
        }
        if options.ipv4_only {
            args.push("--ipv4".to_string());
        }
        args
    }

    /// Spawn fping and wait for it to exit
    ///
    /// stdin is closed so fping never falls back to reading targets from it.
    async fn spawn_and_wait(
        &self,
        program: &Path,
        args: &[String],
        hosts: &[Hostname],
    ) -> Result<std::process::Output> {
        let child = Command::new(program)
            .args(&self.leading_args)
            .args(args)
            .args(hosts)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                    AppError::ProbeUnavailable(format!("{}: {}", program.display(), e))
                }
                _ => AppError::Io(e),
            })?;

        Ok(child.wait_with_output().await?)
    }

    /// Build probe output from process output, failing on status >= 3
    fn build_output(output: std::process::Output) -> Result<ProbeOutput> {
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            debug!(line = %line, "fping stderr");
        }

        let Some(exit_code) = output.status.code() else {
            return Err(AppError::ProbeExecution {
                status: SIGNALLED_STATUS,
                cause: "terminated by signal".to_string(),
            });
        };

        let exit = ProbeExit::from_code(exit_code);
        if !exit.is_success() {
            return Err(AppError::ProbeExecution {
                status: exit_code,
                cause: exit.description().to_string(),
            });
        }

        Ok(ProbeOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            exit_code,
        })
    }
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

#[async_trait]
impl ProbeRunner for FpingRunner {
    async fn ensure_available(&self) -> Result<()> {
        let program = self.locate()?;
        debug!(program = %program.display(), "fping located");
        Ok(())
    }

    async fn run(&self, hosts: &[Hostname], options: &ProbeOptions) -> Result<ProbeOutput> {
        let program = self.locate()?;
        let args = Self::build_args(options);
        let start_time = self.time_provider.now_millis();

        info!(
            program = %program.display(),
            args = ?args,
            hosts = hosts.len(),
            "Starting fping"
        );

        let output = self.spawn_and_wait(&program, &args, hosts).await?;
        let duration_ms = self.time_provider.now_millis() - start_time;

        info!(
            duration_ms = %duration_ms,
            exit_code = ?output.status.code(),
            "fping completed"
        );

        Self::build_output(output)
    }
}
