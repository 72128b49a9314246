// order_flow/src/retry.rs

//! Retry policy and the injectable delay used between attempts.

use async_trait::async_trait;
use std::time::Duration;

/// Exponential backoff applied to a single pipeline step.
///
/// After failed attempt `n` (1-based) the pipeline waits `base_delay * 2^n` before
/// attempt `n + 1`. The final attempt is followed by a wait only when
/// `delay_after_last` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  pub max_attempts: u32,
  pub base_delay: Duration,
  pub delay_after_last: bool,
}

impl RetryPolicy {
  pub fn exponential(max_attempts: u32, base_delay: Duration) -> Self {
    Self {
      max_attempts: max_attempts.max(1),
      base_delay,
      delay_after_last: false,
    }
  }

  /// Also waits `delay_after(max_attempts)` after the last failed attempt,
  /// before the step reports its retries as exhausted.
  pub fn with_delay_after_last(mut self) -> Self {
    self.delay_after_last = true;
    self
  }

  /// A policy that runs the step once.
  pub fn none() -> Self {
    Self::exponential(1, Duration::ZERO)
  }

  /// Delay to wait after the given failed attempt.
  pub fn delay_after(&self, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt);
    self.base_delay.saturating_mul(factor)
  }

  /// Sum of every delay the pipeline would wait if all attempts failed.
  pub fn total_backoff(&self) -> Duration {
    let last = if self.delay_after_last {
      self.max_attempts
    } else {
      self.max_attempts.saturating_sub(1)
    };
    (1..=last).map(|attempt| self.delay_after(attempt)).sum()
  }
}

/// Suspends the pipeline between retry attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
  async fn sleep(&self, delay: Duration);
}

/// Real wall-clock delay backed by `tokio::time::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
  async fn sleep(&self, delay: Duration) {
    tokio::time::sleep(delay).await;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn delays_double_from_base() {
    let policy = RetryPolicy::exponential(3, Duration::from_secs(1));
    assert_eq!(policy.delay_after(1), Duration::from_secs(2));
    assert_eq!(policy.delay_after(2), Duration::from_secs(4));
    assert_eq!(policy.delay_after(3), Duration::from_secs(8));
  }

  #[test]
  fn total_backoff_excludes_wait_after_last_attempt() {
    let policy = RetryPolicy::exponential(3, Duration::from_secs(1));
    assert_eq!(policy.total_backoff(), Duration::from_secs(6));
    assert_eq!(RetryPolicy::none().total_backoff(), Duration::ZERO);
  }

  #[test]
  fn total_backoff_with_delay_after_last() {
    let policy = RetryPolicy::exponential(3, Duration::from_secs(1)).with_delay_after_last();
    assert_eq!(policy.total_backoff(), Duration::from_secs(14));
  }

  #[test]
  fn zero_attempts_is_clamped_to_one() {
    assert_eq!(RetryPolicy::exponential(0, Duration::from_secs(1)).max_attempts, 1);
  }
}
