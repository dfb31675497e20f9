//! Bounded retry loop with a pluggable backoff policy.
//!
//! Retry is explicit control flow here: each failure is classified before
//! deciding eligibility, and only errors the caller marks retryable consume
//! an attempt's backoff delay.

use std::future::Future;

use tracing::warn;

use crate::backoff::BackoffPolicy;

/// Runs `op` up to `max_attempts` times, sleeping per the backoff policy
/// between attempts.
///
/// `op` receives the zero-based attempt number. `is_retryable` decides
/// whether a given error is worth another attempt; non-retryable errors
/// and the final attempt's error are returned as-is.
pub async fn retry_with_policy<T, E, F, Fut, P>(
    policy: &dyn BackoffPolicy,
    max_attempts: u32,
    is_retryable: P,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) if is_retryable(&error) && attempt + 1 < max_attempts => {
                let delay = policy.next_delay(attempt);
                warn!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "transient failure, backing off before retry"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
