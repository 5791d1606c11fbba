//! Retry primitives and helpers

pub mod cmd;
pub mod delay;
pub mod retry;

pub use cmd::log_cmd;
pub use delay::{delay, delay_ms};
pub use retry::{retry_with_backoff, Payload, RetryContext, RetryError, RetryOptions};
