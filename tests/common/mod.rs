//! Shared test helpers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tokio::time::Instant;

use backoff_retry::{Payload, RetryContext, RetryLogger};

/// One record captured by [`RecordingLogger`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub message: String,
    pub payload: Payload,
    pub delay_time_in_seconds: u64,
    pub attempts_left: u32,
    pub error: String,
}

/// Logger that keeps every record in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<Record>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl RetryLogger for RecordingLogger {
    fn error(&self, message: &str, context: &RetryContext<'_>) {
        self.records.lock().unwrap().push(Record {
            message: message.to_string(),
            payload: context.payload.clone(),
            delay_time_in_seconds: context.delay_time_in_seconds,
            attempts_left: context.attempts_left,
            error: context.error.clone(),
        });
    }
}

/// Operation stand-in that fails a fixed number of times, then succeeds.
///
/// Records the (virtual) instant of every invocation.
#[derive(Debug, Clone)]
pub struct Flaky {
    failures: usize,
    calls: Arc<Mutex<Vec<Instant>>>,
}

impl Flaky {
    pub fn failing(failures: usize) -> Self {
        Self {
            failures,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always_failing() -> Self {
        Self::failing(usize::MAX)
    }

    pub async fn call(&self) -> Result<usize, String> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(Instant::now());
        let n = calls.len();
        if n <= self.failures {
            Err(format!("failure #{}", n))
        } else {
            Ok(n)
        }
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Gaps between consecutive invocations, in milliseconds.
    pub fn gaps_ms(&self) -> Vec<u128> {
        let calls = self.calls.lock().unwrap();
        calls
            .windows(2)
            .map(|w| (w[1] - w[0]).as_millis())
            .collect()
    }
}
