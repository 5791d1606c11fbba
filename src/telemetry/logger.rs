//! Logger capability used by the retrier to report failed attempts.

use crate::util::retry::RetryContext;

/// Sink for failed-attempt records.
///
/// Called once per failure that is followed by a retry. Implementations must
/// not assume anything about the payload shape.
pub trait RetryLogger: Send + Sync {
    /// Record a failed attempt.
    fn error(&self, message: &str, context: &RetryContext<'_>);
}

impl<F> RetryLogger for F
where
    F: Fn(&str, &RetryContext<'_>) + Send + Sync,
{
    fn error(&self, message: &str, context: &RetryContext<'_>) {
        self(message, context)
    }
}

/// Default logger: emits a `tracing` error event with the context as fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RetryLogger for TracingLogger {
    fn error(&self, message: &str, context: &RetryContext<'_>) {
        let payload = serde_json::to_string(context.payload).unwrap_or_default();
        tracing::error!(
            target: "backoff_retry::retry",
            %payload,
            delay_time_in_seconds = context.delay_time_in_seconds,
            attempts_left = context.attempts_left,
            error = %context.error,
            "{}",
            message
        );
    }
}
