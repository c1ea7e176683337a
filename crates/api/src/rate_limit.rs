//! Per-IP rate limiting for the login endpoint.
//!
//! Fixed-window counter keyed by a hash of the client IP: 5 requests per
//! 60-second window by default. Each allowed request resets the window's
//! expiry to one full window from that request, so the window slides forward
//! while a client keeps knocking below the threshold. Once the counter hits
//! the threshold, requests are rejected with a fixed retry-after until the
//! window lapses through inactivity.
//!
//! Counters live in an in-process map; expired entries are dropped lazily
//! when the same key is touched again. There is no background sweeper.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use shared::crypto::sha256_hex;

/// Rejection from the limiter: how long the client should wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryAfter(pub u64);

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    expires_at: DateTime<Utc>,
}

/// Fixed-window login rate limiter.
#[derive(Debug)]
pub struct LoginRateLimiter {
    windows: RwLock<HashMap<String, Window>>,
    max_requests: u32,
    window_secs: u64,
}

impl LoginRateLimiter {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            max_requests,
            window_secs,
        }
    }

    /// Checks whether a login attempt from `client_ip` is allowed.
    ///
    /// An undeterminable IP fails closed: the request is rejected as if the
    /// limit were already exceeded.
    pub fn check(&self, client_ip: Option<&str>) -> Result<(), RetryAfter> {
        self.check_at(client_ip, Utc::now())
    }

    pub fn check_at(
        &self,
        client_ip: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), RetryAfter> {
        let ip = match client_ip {
            Some(ip) if !ip.is_empty() => ip,
            _ => return Err(RetryAfter(self.window_secs)),
        };

        // Raw addresses never become map keys.
        let key = sha256_hex(ip);
        let mut windows = self.windows.write().expect("rate limiter lock poisoned");

        let count = match windows.get(&key) {
            Some(window) if now < window.expires_at => window.count,
            _ => 0,
        };

        if count >= self.max_requests {
            return Err(RetryAfter(self.window_secs));
        }

        windows.insert(
            key,
            Window {
                count: count + 1,
                expires_at: now + Duration::seconds(self.window_secs as i64),
            },
        );
        Ok(())
    }
}
