//! Sliding-window call budgets, keyed by provider name.
//!
//! Check-and-record is a single atomic operation: a call that is allowed is
//! recorded before the lock is released, so two concurrent callers can never
//! both observe spare capacity for the same slot. Windows are fully
//! independent per provider — exhausting one provider never blocks another.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

/// Sliding-window rate limiter shared across concurrent requests.
pub struct SlidingWindowLimiter {
    max_calls: usize,
    window: Duration,
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_calls: usize, window: Duration) -> Self {
        Self {
            max_calls,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_calls, Duration::from_secs(config.window_secs))
    }

    /// Request permission to call `provider`. On success the call is recorded
    /// immediately. Never panics; a poisoned lock denies the call.
    pub fn try_acquire(&self, provider: &str) -> bool {
        let Ok(mut windows) = self.windows.lock() else {
            tracing::warn!(provider, "rate limiter lock poisoned, denying call");
            return false;
        };

        let now = Instant::now();
        let window = windows.entry(provider.to_string()).or_default();

        // Prune timestamps that fell out of the trailing window.
        while let Some(&oldest) = window.front() {
            if now.duration_since(oldest) >= self.window {
                window.pop_front();
            } else {
                break;
            }
        }

        if window.len() < self.max_calls {
            window.push_back(now);
            true
        } else {
            tracing::debug!(provider, in_window = window.len(), "rate limit exhausted");
            false
        }
    }

    /// Calls currently recorded inside the window for `provider`.
    pub fn in_window(&self, provider: &str) -> usize {
        let now = Instant::now();
        self.windows
            .lock()
            .map(|windows| {
                windows
                    .get(provider)
                    .map(|w| {
                        w.iter()
                            .filter(|t| now.duration_since(**t) < self.window)
                            .count()
                    })
                    .unwrap_or(0)
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_max_calls() {
        let limiter = SlidingWindowLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.try_acquire("openai"));
        assert!(limiter.try_acquire("openai"));
        assert!(limiter.try_acquire("openai"));
        assert!(!limiter.try_acquire("openai"));
        assert_eq!(limiter.in_window("openai"), 3);
    }

    #[test]
    fn providers_are_independent() {
        let limiter = SlidingWindowLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.try_acquire("openai"));
        assert!(!limiter.try_acquire("openai"));
        // A saturated provider blocks only its own calls.
        assert!(limiter.try_acquire("mistral"));
    }

    #[test]
    fn capacity_recovers_after_window() {
        let limiter = SlidingWindowLimiter::new(2, Duration::from_millis(40));
        assert!(limiter.try_acquire("p"));
        assert!(limiter.try_acquire("p"));
        assert!(!limiter.try_acquire("p"));

        std::thread::sleep(Duration::from_millis(50));
        assert!(limiter.try_acquire("p"));
    }

    #[test]
    fn unknown_provider_starts_empty() {
        let limiter = SlidingWindowLimiter::new(5, Duration::from_secs(60));
        assert_eq!(limiter.in_window("never-called"), 0);
    }

    #[test]
    fn concurrent_acquires_never_exceed_budget() {
        use std::sync::Arc;

        let limiter = Arc::new(SlidingWindowLimiter::new(10, Duration::from_secs(60)));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let limiter = Arc::clone(&limiter);
            handles.push(std::thread::spawn(move || {
                let mut granted = 0usize;
                for _ in 0..10 {
                    if limiter.try_acquire("shared") {
                        granted += 1;
                    }
                }
                granted
            }));
        }
        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 10);
    }
}
