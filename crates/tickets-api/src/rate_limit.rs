// Sliding-window rate limiter
//
// Bounds outbound calls to `max_calls` per trailing `period`. The whole
// prune-check-wait-record sequence runs under one async mutex, so a caller
// that wakes from its wait re-evaluates the window with nobody else
// slipping in between.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

/// Default quota: calls per period.
pub const DEFAULT_MAX_CALLS: usize = 20;
/// Default rolling window.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

/// Rolling-window limiter shared by every request of a live client.
#[derive(Debug)]
pub struct RateLimiter {
    max_calls: usize,
    period: Duration,
    /// Call timestamps inside the trailing window, oldest first.
    calls: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a limiter allowing `max_calls` per `period`. A quota of zero
    /// is treated as one.
    pub fn new(max_calls: usize, period: Duration) -> Self {
        let max_calls = max_calls.max(1);
        Self {
            max_calls,
            period,
            calls: Mutex::new(VecDeque::with_capacity(max_calls)),
        }
    }

    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait until a call slot is free, then record the call.
    ///
    /// Never fails. Callers needing an upper bound on the wait should wrap
    /// this in `tokio::time::timeout`.
    pub async fn acquire(&self) {
        let mut calls = self.calls.lock().await;

        loop {
            let now = Instant::now();
            prune(&mut calls, now, self.period);

            if calls.len() < self.max_calls {
                calls.push_back(now);
                return;
            }

            let Some(&oldest) = calls.front() else {
                // max_calls >= 1 keeps a full window non-empty.
                calls.push_back(now);
                return;
            };

            let wait = self.period.saturating_sub(now.duration_since(oldest));
            warn!(
                wait_secs = wait.as_secs_f64(),
                "rate limit reached, waiting for a free slot"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Number of calls currently inside the window.
    pub async fn in_flight(&self) -> usize {
        let mut calls = self.calls.lock().await;
        prune(&mut calls, Instant::now(), self.period);
        calls.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CALLS, DEFAULT_PERIOD)
    }
}

fn prune(calls: &mut VecDeque<Instant>, now: Instant, period: Duration) {
    while let Some(&oldest) = calls.front() {
        if now.duration_since(oldest) >= period {
            calls.pop_front();
        } else {
            break;
        }
    }
}
