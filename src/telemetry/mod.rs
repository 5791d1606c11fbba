//! Logging for backoff-retry.
//!
//! - The [`RetryLogger`] capability the retrier reports failed attempts to
//! - [`TracingLogger`], the default logger, built on the `tracing` crate
//! - Subscriber setup for binaries via [`init_telemetry`]
//!
//! # Feature Flags
//!
//! - `release-logs`: Strip debug/trace at compile time
//! - `max-perf`: Disable all tracing for maximum performance

mod init;
mod logger;

pub use init::{init_telemetry, TelemetryConfig, TelemetryGuard};
pub use logger::{RetryLogger, TracingLogger};
