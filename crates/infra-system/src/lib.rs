// pingpoll Infrastructure - System Adapters
// Implements: ProbeRunner

pub mod fping_runner;

pub use fping_runner::FpingRunner;
