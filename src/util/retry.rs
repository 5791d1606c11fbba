//! Retry logic with exponential backoff

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::delay::delay;
use crate::telemetry::{RetryLogger, TracingLogger};

/// Growth factor applied to the delay after every failed attempt
pub const DELAY_MULTIPLIER: f64 = 1.5;

/// Default number of retries after the first attempt
pub const DEFAULT_ATTEMPTS: u32 = 24;

/// Default wait before the first retry, in milliseconds
pub const DEFAULT_DELAY_MS: u64 = 5000;

/// Caller-supplied diagnostic context attached to every failure record.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Context handed to the logger for each failed attempt that will be retried.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryContext<'a> {
    pub payload: &'a Payload,
    /// Upcoming wait, rounded to whole seconds
    pub delay_time_in_seconds: u64,
    pub attempts_left: u32,
    /// Display text of the underlying error
    pub error: String,
}

/// Returned when the operation failed and no retry attempts were left.
///
/// Carries the last error from the operation as its source.
#[derive(Error, Debug)]
#[error("{operation} failed after {invocations} invocation(s), no retry attempts left: {source}")]
pub struct RetryError<E> {
    operation: String,
    invocations: u32,
    #[source]
    source: E,
}

impl<E> RetryError<E> {
    /// Name of the operation that was retried
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Total number of times the operation was invoked
    pub fn invocations(&self) -> u32 {
        self.invocations
    }

    /// The error returned by the final invocation
    pub fn last_error(&self) -> &E {
        &self.source
    }

    pub fn into_inner(self) -> E {
        self.source
    }
}

/// Options for retry behavior
#[derive(Clone)]
pub struct RetryOptions {
    /// Message logged on every failed attempt (default: synthesized per attempt)
    pub error_message: Option<String>,
    /// Retries remaining after the first attempt (default: 24)
    pub attempts: u32,
    /// Wait before the first retry (default: 5000ms)
    pub delay_time: Duration,
    /// Sink for failed-attempt records (default: `TracingLogger`)
    pub logger: Arc<dyn RetryLogger>,
    /// Name used in messages and errors (default: the operation's type name)
    pub operation_name: Option<String>,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            error_message: None,
            attempts: DEFAULT_ATTEMPTS,
            delay_time: Duration::from_millis(DEFAULT_DELAY_MS),
            logger: Arc::new(TracingLogger),
            operation_name: None,
        }
    }
}

impl fmt::Debug for RetryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryOptions")
            .field("error_message", &self.error_message)
            .field("attempts", &self.attempts)
            .field("delay_time", &self.delay_time)
            .field("operation_name", &self.operation_name)
            .finish_non_exhaustive()
    }
}

impl RetryOptions {
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn with_delay(mut self, delay_time: Duration) -> Self {
        self.delay_time = delay_time;
        self
    }

    pub fn with_delay_ms(self, ms: u64) -> Self {
        self.with_delay(Duration::from_millis(ms))
    }

    pub fn with_logger(mut self, logger: Arc<dyn RetryLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

/// Delay to use after `current`, saturating at `Duration::MAX`.
pub fn next_delay(current: Duration) -> Duration {
    Duration::try_from_secs_f64(current.as_secs_f64() * DELAY_MULTIPLIER).unwrap_or(Duration::MAX)
}

/// Whole seconds shown in log records; the actual wait is not rounded.
pub fn delay_in_seconds(delay: Duration) -> u64 {
    delay.as_secs_f64().round() as u64
}

/// Retry an async operation with exponential backoff.
///
/// The operation is invoked once, then up to `options.attempts` more times.
/// Before each retry the failure is reported to `options.logger` and the task
/// sleeps for the current delay, which starts at `options.delay_time` and is
/// multiplied by [`DELAY_MULTIPLIER`] after every failure. When the operation
/// fails with no attempts left, the last error is returned inside a
/// [`RetryError`].
///
/// # Example
///
/// ```rust,no_run
/// use backoff_retry::{retry_with_backoff, Payload, RetryOptions};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let options = RetryOptions::default()
///     .with_attempts(3)
///     .with_delay_ms(1000)
///     .with_operation_name("ping");
///
/// let value = retry_with_backoff(
///     || async { Ok::<_, std::io::Error>(42) },
///     Payload::new(),
///     &options,
/// )
/// .await?;
/// assert_eq!(value, 42);
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_backoff<T, E, F, Fut>(
    mut operation: F,
    payload: Payload,
    options: &RetryOptions,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let operation_name: Cow<'_, str> = match options.operation_name {
        Some(ref name) => Cow::Borrowed(name.as_str()),
        None => Cow::Borrowed(std::any::type_name::<F>()),
    };

    let mut attempts = options.attempts;
    let mut delay_time = options.delay_time;
    let mut invocations: u32 = 0;

    loop {
        invocations = invocations.saturating_add(1);

        let error = match operation().await {
            Ok(result) => return Ok(result),
            Err(error) if attempts == 0 => {
                tracing::debug!(
                    target: "backoff_retry::retry",
                    operation = %operation_name,
                    invocations,
                    "no retry attempts left"
                );
                return Err(RetryError {
                    operation: operation_name.into_owned(),
                    invocations,
                    source: error,
                });
            }
            Err(error) => error.to_string(),
        };

        let attempts_left = attempts - 1;
        let next_delay_time = next_delay(delay_time);
        let delay_time_in_seconds = delay_in_seconds(delay_time);

        let message: Cow<'_, str> = match options.error_message {
            Some(ref message) => Cow::Borrowed(message.as_str()),
            None => Cow::Owned(format!(
                "Error calling {}. Retrying in {} seconds, attempts left: {}",
                operation_name, delay_time_in_seconds, attempts_left
            )),
        };

        options.logger.error(
            &message,
            &RetryContext {
                payload: &payload,
                delay_time_in_seconds,
                attempts_left,
                error,
            },
        );

        delay(delay_time).await;

        attempts = attempts_left;
        delay_time = next_delay_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_delay() {
        let delay0 = Duration::from_millis(1000);
        let delay1 = next_delay(delay0);
        assert_eq!(delay1.as_millis(), 1500);

        let delay2 = next_delay(delay1);
        assert_eq!(delay2.as_millis(), 2250);

        let delay3 = next_delay(delay2);
        assert_eq!(delay3.as_micros(), 3_375_000);
    }

    #[test]
    fn test_next_delay_saturates() {
        assert_eq!(next_delay(Duration::MAX), Duration::MAX);
    }

    #[test]
    fn test_next_delay_of_zero() {
        assert_eq!(next_delay(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_delay_in_seconds_rounds() {
        assert_eq!(delay_in_seconds(Duration::from_millis(5000)), 5);
        assert_eq!(delay_in_seconds(Duration::from_millis(7500)), 8);
        assert_eq!(delay_in_seconds(Duration::from_millis(1499)), 1);
        assert_eq!(delay_in_seconds(Duration::from_millis(400)), 0);
    }

    #[test]
    fn test_default_options() {
        let options = RetryOptions::default();
        assert_eq!(options.attempts, 24);
        assert_eq!(options.delay_time, Duration::from_millis(5000));
        assert!(options.error_message.is_none());
        assert!(options.operation_name.is_none());
    }

    #[test]
    fn test_options_debug_omits_logger() {
        let options = RetryOptions::default().with_error_message("boom");
        let debug = format!("{:?}", options);
        assert!(debug.contains("boom"));
        assert!(debug.contains(".."));
    }

    #[test]
    fn test_context_serializes_camel_case() {
        let mut payload = Payload::new();
        payload.insert("engineId".into(), serde_json::json!(7));
        let context = RetryContext {
            payload: &payload,
            delay_time_in_seconds: 5,
            attempts_left: 23,
            error: "connection refused".to_string(),
        };

        let value = serde_json::to_value(&context).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "payload": { "engineId": 7 },
                "delayTimeInSeconds": 5,
                "attemptsLeft": 23,
                "error": "connection refused"
            })
        );
    }

    #[tokio::test]
    async fn test_retry_success_first_try() {
        let options = RetryOptions::default();
        let result: Result<i32, RetryError<&str>> =
            retry_with_backoff(|| async { Ok(42) }, Payload::new(), &options).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_zero_attempts_fails_after_one_invocation() {
        let options = RetryOptions::default().with_attempts(0);

        let mut calls = 0;
        let result: Result<i32, _> = retry_with_backoff(
            || {
                calls += 1;
                async { Err("Not found".to_string()) }
            },
            Payload::new(),
            &options,
        )
        .await;

        let error = result.unwrap_err();
        assert_eq!(calls, 1);
        assert_eq!(error.invocations(), 1);
        assert_eq!(error.last_error(), "Not found");
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_error_names_operation() {
        let options = RetryOptions::default()
            .with_attempts(1)
            .with_delay_ms(10)
            .with_operation_name("validate engine")
            .with_logger(Arc::new(|_: &str, _: &RetryContext<'_>| {}));

        let result: Result<(), _> =
            retry_with_backoff(|| async { Err("offline") }, Payload::new(), &options).await;

        let error = result.unwrap_err();
        assert_eq!(error.operation(), "validate engine");
        assert_eq!(error.invocations(), 2);
        assert_eq!(
            error.to_string(),
            "validate engine failed after 2 invocation(s), no retry attempts left: offline"
        );
        assert_eq!(error.into_inner(), "offline");
    }
}
