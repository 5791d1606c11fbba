//! Non-blocking delay

use std::time::Duration;
use tokio::time::sleep;

/// Suspend the current task for at least `duration`.
///
/// Yields to the runtime while waiting, so other tasks keep running.
pub async fn delay(duration: Duration) {
    sleep(duration).await;
}

/// Suspend the current task for at least `ms` milliseconds.
pub async fn delay_ms(ms: u64) {
    delay(Duration::from_millis(ms)).await;
}
