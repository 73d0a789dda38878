// Probe Runner Port
// Abstraction over the external reachability prober (fping)

use crate::domain::{Hostname, ProbeOptions, ProbeOutput};
use crate::error::Result;
use async_trait::async_trait;

/// Probe Runner trait
///
/// Implementations:
/// - FpingRunner: spawns the fping executable
#[async_trait]
pub trait ProbeRunner: Send + Sync {
    /// Fail with AppError::ProbeUnavailable if the prober cannot be located
    async fn ensure_available(&self) -> Result<()>;

    /// Probe all `hosts` in one run of the prober
    ///
    /// # Errors
    /// - AppError::ProbeUnavailable if the prober cannot be located
    /// - AppError::ProbeExecution if the prober exits with status >= 3
    async fn run(&self, hosts: &[Hostname], options: &ProbeOptions) -> Result<ProbeOutput>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::ProbeExit;
    use crate::error::AppError;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Return canned stdout with the given exit code
        Output { stdout: String, exit_code: i32 },
        /// Fail as if the prober exited with a hard failure status
        ExitStatus(i32),
        /// Fail as if the prober is not installed
        Unavailable,
    }

    /// Mock Probe Runner for testing
    pub struct MockProbeRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        calls: Arc<Mutex<Vec<(Vec<Hostname>, ProbeOptions)>>>,
    }

    impl MockProbeRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Canned stdout, exit code 0
        pub fn with_stdout(stdout: impl Into<String>) -> Self {
            Self::new(MockBehavior::Output {
                stdout: stdout.into(),
                exit_code: 0,
            })
        }

        pub fn new_failing(status: i32) -> Self {
            Self::new(MockBehavior::ExitStatus(status))
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn last_call(&self) -> Option<(Vec<Hostname>, ProbeOptions)> {
            self.calls.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl ProbeRunner for MockProbeRunner {
        async fn ensure_available(&self) -> Result<()> {
            match *self.behavior.lock().unwrap() {
                MockBehavior::Unavailable => {
                    Err(AppError::ProbeUnavailable("mock prober".to_string()))
                }
                _ => Ok(()),
            }
        }

        async fn run(&self, hosts: &[Hostname], options: &ProbeOptions) -> Result<ProbeOutput> {
            self.calls
                .lock()
                .unwrap()
                .push((hosts.to_vec(), options.clone()));

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Output { stdout, exit_code } => Ok(ProbeOutput { stdout, exit_code }),
                MockBehavior::ExitStatus(status) => Err(AppError::ProbeExecution {
                    status,
                    cause: ProbeExit::from_code(status).description().to_string(),
                }),
                MockBehavior::Unavailable => {
                    Err(AppError::ProbeUnavailable("mock prober".to_string()))
                }
            }
        }
    }
}
