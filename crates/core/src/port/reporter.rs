// Reporter Port
// Sink for operator-facing output (console in production, recorder in tests)

use crate::domain::CheckWarning;

/// Reporting sink passed explicitly to the services that talk to the operator
pub trait Reporter: Send + Sync {
    /// Emit an informational line
    fn line(&self, text: &str);

    /// Emit a non-fatal warning
    fn warn(&self, warning: &CheckWarning);
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Captures everything instead of printing it
    #[derive(Default)]
    pub struct RecordingReporter {
        lines: Mutex<Vec<String>>,
        warnings: Mutex<Vec<CheckWarning>>,
    }

    impl RecordingReporter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }

        pub fn warnings(&self) -> Vec<CheckWarning> {
            self.warnings.lock().unwrap().clone()
        }
    }

    impl Reporter for RecordingReporter {
        fn line(&self, text: &str) {
            self.lines.lock().unwrap().push(text.to_string());
        }

        fn warn(&self, warning: &CheckWarning) {
            self.warnings.lock().unwrap().push(warning.clone());
        }
    }
}
