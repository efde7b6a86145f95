use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

/// Fixed-window limiter configuration. The default mirrors the submission
/// endpoint budget: five requests per key per minute.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub limit: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: 5,
            window: Duration::from_secs(60),
        }
    }
}

/// Outcome of counting one request against a key's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32, reset_in: Duration },
    Limited { reset_in: Duration },
}

struct WindowState {
    count: u32,
    reset_at: Instant,
}

/// Per-key fixed-window counters behind a read-write lock.
pub struct RateLimiter {
    windows: RwLock<HashMap<String, WindowState>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Counts one request against the key's current window.
    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut windows = self.windows.write();
        let state = windows.entry(key.to_string()).or_insert_with(|| WindowState {
            count: 0,
            reset_at: now + self.config.window,
        });

        if now >= state.reset_at {
            state.count = 0;
            state.reset_at = now + self.config.window;
        }
        state.count += 1;

        let reset_in = state.reset_at.saturating_duration_since(now);
        if state.count <= self.config.limit {
            RateDecision::Allowed {
                remaining: self.config.limit - state.count,
                reset_in,
            }
        } else {
            debug!(key, "rate limit exceeded");
            RateDecision::Limited { reset_in }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
