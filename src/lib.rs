//! backoff-retry - Retry async operations with exponential backoff
//!
//! Invokes a fallible async operation until it succeeds or its retry budget
//! runs out, waiting longer (×1.5) after every failure and reporting each
//! failed attempt to a pluggable logger.

pub mod cli;
pub mod config;
pub mod telemetry;
pub mod util;

pub use config::{ConfigError, RetryConfig};
pub use telemetry::{RetryLogger, TracingLogger};
pub use util::retry::{DELAY_MULTIPLIER, DEFAULT_ATTEMPTS, DEFAULT_DELAY_MS};
pub use util::{delay, delay_ms, retry_with_backoff, Payload, RetryContext, RetryError, RetryOptions};
