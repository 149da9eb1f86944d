//! Best-effort per-key mutation counter used for coarse abuse mitigation.
//!
//! This is not a correctness mechanism: counts are process-local, reset on
//! restart, and keys are evicted opportunistically once the map is full.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Fixed-window request counter keyed by arbitrary strings (here `ip:path`).
pub struct RateLimiter {
    hits: DashMap<String, Window>,
    window: Duration,
    max_entries: usize,
}

struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    /// Build a limiter with the given window length and entry cap.
    pub fn new(window: Duration, max_entries: usize) -> Self {
        Self {
            hits: DashMap::new(),
            window,
            max_entries,
        }
    }

    /// Record one hit for `key` at `now` and return the total count within
    /// the current window, including this hit.
    pub fn register_hit(&self, key: &str, now: Instant) -> u32 {
        if self.hits.len() >= self.max_entries {
            self.sweep(now);
        }

        let mut entry = self.hits.entry(key.to_owned()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }
        entry.count += 1;
        entry.count
    }

    /// Drop every key whose window has elapsed.
    fn sweep(&self, now: Instant) {
        self.hits
            .retain(|_, window| now.duration_since(window.started) < self.window);
    }
}
