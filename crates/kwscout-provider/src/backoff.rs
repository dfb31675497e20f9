//! Backoff policy for transient-failure retries.

use std::time::Duration;

use rand::Rng as _;

/// Computes the delay before a retry attempt.
///
/// `attempt` is zero-based: the delay returned for attempt 0 is slept
/// before the second try.
pub trait BackoffPolicy: Send + Sync {
    /// Returns the delay before retrying after the given failed attempt.
    fn next_delay(&self, attempt: u32) -> Duration;
}

/// Exponential backoff with a cap and optional jitter.
///
/// Delays double per attempt starting from `base`, capped at `cap`. Jitter
/// adds up to a quarter of the computed delay so synchronized clients
/// spread out their retries.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    base: Duration,
    cap: Duration,
    jitter: bool,
}

impl ExponentialBackoff {
    /// Creates a policy with the given base delay and cap, jitter enabled.
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self {
            base,
            cap,
            jitter: true,
        }
    }

    /// Disables jitter. Used by tests that assert exact delays.
    #[must_use]
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    fn capped_delay(&self, attempt: u32) -> Duration {
        // Shift saturates well before overflow territory.
        let factor = 1u32.checked_shl(attempt.min(16)).unwrap_or(u32::MAX);
        self.base.checked_mul(factor).unwrap_or(self.cap).min(self.cap)
    }
}

impl Default for ExponentialBackoff {
    /// Base 1 s, doubling, capped at 8 s.
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(8))
    }
}

impl BackoffPolicy for ExponentialBackoff {
    fn next_delay(&self, attempt: u32) -> Duration {
        let delay = self.capped_delay(attempt);
        if !self.jitter {
            return delay;
        }

        let quarter = (delay.as_millis() as u64) / 4;
        let extra = if quarter == 0 {
            0
        } else {
            rand::rng().random_range(0..=quarter)
        };
        delay + Duration::from_millis(extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_up_to_cap() {
        let policy = ExponentialBackoff::default().without_jitter();
        assert_eq!(policy.next_delay(0), Duration::from_secs(1));
        assert_eq!(policy.next_delay(1), Duration::from_secs(2));
        assert_eq!(policy.next_delay(2), Duration::from_secs(4));
        assert_eq!(policy.next_delay(3), Duration::from_secs(8));
        assert_eq!(policy.next_delay(10), Duration::from_secs(8));
    }

    #[test]
    fn large_attempt_does_not_overflow() {
        let policy = ExponentialBackoff::default().without_jitter();
        assert_eq!(policy.next_delay(u32::MAX), Duration::from_secs(8));
    }

    #[test]
    fn jitter_stays_within_a_quarter() {
        let policy = ExponentialBackoff::default();
        for attempt in 0..4 {
            let bare = ExponentialBackoff::default()
                .without_jitter()
                .next_delay(attempt);
            let jittered = policy.next_delay(attempt);
            assert!(jittered >= bare);
            assert!(jittered <= bare + bare / 4);
        }
    }

    #[test]
    fn custom_base_and_cap() {
        let policy =
            ExponentialBackoff::new(Duration::from_millis(100), Duration::from_millis(250))
                .without_jitter();
        assert_eq!(policy.next_delay(0), Duration::from_millis(100));
        assert_eq!(policy.next_delay(1), Duration::from_millis(200));
        assert_eq!(policy.next_delay(2), Duration::from_millis(250));
    }
}
