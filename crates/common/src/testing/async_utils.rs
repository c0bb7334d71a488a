//! Async testing utilities

// Test helpers are self-explanatory; skip the error/panic doc sections.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

use std::future::Future;
use std::time::Duration;

/// Wait for a future to complete with a timeout, returning a Result
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use convene_common::testing::timeout_ok;
///
/// # async fn example() {
/// let result = timeout_ok(Duration::from_millis(100), async { 42 }).await;
/// assert_eq!(result.ok(), Some(42));
/// # }
/// ```
pub async fn timeout_ok<F, T>(duration: Duration, fut: F) -> Result<T, tokio::time::error::Elapsed>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(duration, fut).await
}

/// Poll an async condition until it returns true or times out
///
/// Returns `false` if `timeout` elapsed first.
pub async fn poll_until<F, Fut>(timeout: Duration, interval: Duration, mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = std::time::Instant::now();

    while start.elapsed() < timeout {
        if condition().await {
            return true;
        }
        tokio::time::sleep(interval).await;
    }

    false
}
