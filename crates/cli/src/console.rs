// Console sink for operator-facing output

use colored::Colorize;
use pingpoll_core::domain::CheckWarning;
use pingpoll_core::port::Reporter;

/// Lines go to stdout, warnings to stderr
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn line(&self, text: &str) {
        println!("{}", text);
    }

    fn warn(&self, warning: &CheckWarning) {
        eprintln!("{} {}", "WARNING:".yellow().bold(), warning);
    }
}

/// Print a fatal error and its remediation hint
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "ERROR:".red().bold(), err);

    let hint = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<pingpoll_core::AppError>())
        .and_then(|app_err| app_err.remediation());
    if let Some(hint) = hint {
        eprintln!("{} {}", "ERROR:".red().bold(), hint);
    }
}
