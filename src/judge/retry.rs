//! Bounded polling against the judge
//!
//! A [`RetryPolicy`] says how many times to poll and how long to wait between
//! polls; a [`Sleeper`] performs the wait so tests can swap in a fake clock.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

/// Source of delays between polls
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by the Tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Polling policy: attempt ceiling plus fixed or exponential delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    /// Multiplier applied to the delay after each attempt; 1 means fixed delay
    pub backoff_factor: u32,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Fixed delay between attempts
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            backoff_factor: 1,
            max_delay: delay,
        }
    }

    /// Exponential backoff, capped at `max_delay`
    pub fn exponential(max_attempts: u32, delay: Duration, factor: u32, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            backoff_factor: factor.max(1),
            max_delay: max_delay.max(delay),
        }
    }

    /// Delay to wait before the given 1-based attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = self.backoff_factor.saturating_pow(exponent);
        self.delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(
            crate::constants::DEFAULT_JUDGE_POLL_ATTEMPTS,
            Duration::from_millis(crate::constants::DEFAULT_JUDGE_POLL_INTERVAL_MS),
        )
    }
}

/// Outcome of [`poll_until`]
#[derive(Debug, Clone, PartialEq)]
pub enum Polled<T> {
    /// The terminal predicate accepted this value
    Terminal(T),
    /// Attempts ran out; this is the last value observed
    Exhausted(T),
}

impl<T> Polled<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Terminal(value) | Self::Exhausted(value) => value,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted(_))
    }
}

/// Wait, fetch, and repeat until `is_terminal` holds or the policy is spent.
///
/// A fetch error ends polling immediately and is returned as-is.
pub async fn poll_until<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut fetch: F,
    is_terminal: P,
) -> Result<Polled<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&T) -> bool,
{
    let mut attempt = 1;
    loop {
        sleeper.sleep(policy.delay_for(attempt)).await;
        let value = fetch().await?;

        if is_terminal(&value) {
            tracing::debug!(attempt, "Judge poll reached terminal state");
            return Ok(Polled::Terminal(value));
        }
        if attempt >= policy.max_attempts {
            tracing::warn!(attempts = attempt, "Judge poll attempts exhausted");
            return Ok(Polled::Exhausted(value));
        }
        attempt += 1;
    }
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::fake::FakeSleeper;
    use super::*;

    #[test]
    fn test_fixed_delay() {
        let policy = RetryPolicy::fixed(3, Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(3), Duration::from_secs(1));
    }

    #[test]
    fn test_exponential_delay_is_capped() {
        let policy = RetryPolicy::exponential(
            6,
            Duration::from_millis(100),
            2,
            Duration::from_millis(500),
        );
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for(4), Duration::from_millis(500));
    }

    #[test]
    fn test_zero_attempts_is_clamped() {
        assert_eq!(RetryPolicy::fixed(0, Duration::ZERO).max_attempts, 1);
    }

    #[tokio::test]
    async fn test_stops_at_terminal_value() {
        let sleeper = FakeSleeper::default();
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::fixed(10, Duration::from_secs(1));

        let polled = poll_until(
            &policy,
            &sleeper,
            move || async move { Ok::<_, ()>(calls.fetch_add(1, Ordering::SeqCst) + 1) },
            |n| *n == 3,
        )
        .await
        .unwrap();

        assert_eq!(polled, Polled::Terminal(3));
        assert_eq!(sleeper.calls(), vec![Duration::from_secs(1); 3]);
    }

    #[tokio::test]
    async fn test_exhausts_and_returns_last_value() {
        let sleeper = FakeSleeper::default();
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::fixed(4, Duration::from_millis(10));

        let polled = poll_until(
            &policy,
            &sleeper,
            move || async move { Ok::<_, ()>(calls.fetch_add(1, Ordering::SeqCst) + 1) },
            |_| false,
        )
        .await
        .unwrap();

        assert!(polled.is_exhausted());
        assert_eq!(polled.into_inner(), 4);
        assert_eq!(sleeper.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_fetch_error_short_circuits() {
        let sleeper = FakeSleeper::default();
        let policy = RetryPolicy::fixed(5, Duration::ZERO);

        let result = poll_until(
            &policy,
            &sleeper,
            || async { Err::<u32, _>("network down") },
            |_| true,
        )
        .await;

        assert_eq!(result, Err("network down"));
        assert_eq!(sleeper.calls().len(), 1);
    }
}
