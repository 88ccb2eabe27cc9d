// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded retry policy with exponential backoff and jitter.

use std::time::Duration;

use rand::Rng;

/// Retry policy for chat-completion requests.
///
/// Attempt `n` (1-based) is followed, on failure, by a pause of
/// `base_delay * multiplier^(n-1)`, scaled by a random factor in
/// `[0.5, 1.5)` when jitter is enabled. Rate-limit responses (429) are
/// never retried regardless of this policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Pause before the first retry.
    pub base_delay: Duration,
    /// Backoff multiplier applied per retry.
    pub multiplier: f64,
    /// Whether delays carry random jitter.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(5),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// The pause to take after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1);
        let backoff = self.base_delay.as_secs_f64() * self.multiplier.powi(exp as i32);
        let scaled = if self.jitter {
            backoff * rand::thread_rng().gen_range(0.5..1.5)
        } else {
            backoff
        };
        Duration::from_secs_f64(scaled)
    }
}
