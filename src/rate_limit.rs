use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use dashmap::DashMap;

/// Checks between two sweeps of drained keys.
const SWEEP_EVERY: u64 = 1024;

struct Window {
    span: Duration,
    hits: VecDeque<Instant>,
}

impl Window {
    fn prune(&mut self, now: Instant) {
        while let Some(front) = self.hits.front() {
            if now.duration_since(*front) >= self.span { self.hits.pop_front(); } else { break; }
        }
    }
}

/// Sliding window in-memory rate limiter (process local).
#[derive(Clone)]
pub struct InMemoryRateLimiter {
    windows: Arc<DashMap<String, Window>>,
    checks: Arc<AtomicU64>,
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        Self { windows: Arc::new(DashMap::new()), checks: Arc::new(AtomicU64::new(0)) }
    }

    /// Records a hit for `key` and returns false once `limit` hits already
    /// fall inside `window`.
    pub fn check(&self, key: &str, limit: usize, window: Duration) -> bool {
        let now = Instant::now();
        let allowed = {
            let mut entry = self
                .windows
                .entry(key.to_string())
                .or_insert_with(|| Window { span: window, hits: VecDeque::new() });
            entry.span = window;
            entry.prune(now);
            if entry.hits.len() < limit {
                entry.hits.push_back(now);
                true
            } else {
                false
            }
        };
        // entry guard must be released before sweeping
        if self.checks.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            self.sweep();
        }
        allowed
    }

    /// Drops keys with no hit left inside their window.
    pub fn sweep(&self) {
        let now = Instant::now();
        self.windows.retain(|_, w| {
            w.prune(now);
            !w.hits.is_empty()
        });
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self { Self::new() }
}

/// Per-endpoint budgets for the public write paths.
#[derive(Clone, Debug, PartialEq)]
pub struct RateLimitConfig {
    pub message_limit: usize,
    pub message_window: Duration,
    pub login_limit: usize,
    pub login_window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            message_limit: 5,
            message_window: Duration::from_secs(600),
            login_limit: 10,
            login_window: Duration::from_secs(300),
        }
    }
}

/// Guard used by the contact form and login handlers, keyed by client IP.
#[derive(Clone)]
pub struct RateLimiterFacade {
    pub limiter: InMemoryRateLimiter,
    pub cfg: RateLimitConfig,
}

impl RateLimiterFacade {
    pub fn new(limiter: InMemoryRateLimiter, cfg: RateLimitConfig) -> Self { Self { limiter, cfg } }
    pub fn allow_message(&self, ip: &str) -> bool { self.limiter.check(&format!("message:{ip}"), self.cfg.message_limit, self.cfg.message_window) }
    pub fn allow_login(&self, ip: &str) -> bool { self.limiter.check(&format!("login:{ip}"), self.cfg.login_limit, self.cfg.login_window) }
}
