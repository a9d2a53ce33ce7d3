//! User-Agent providers.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Supplies the User-Agent string for each outgoing request.
pub trait UserAgentSource: Send + Sync {
    fn user_agent(&self) -> String;
}

/// Always returns the same User-Agent.
#[derive(Debug, Clone)]
pub struct StaticUserAgent(String);

impl StaticUserAgent {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self(user_agent.into())
    }
}

impl UserAgentSource for StaticUserAgent {
    fn user_agent(&self) -> String {
        self.0.clone()
    }
}

const DESKTOP_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:127.0) Gecko/20100101 Firefox/127.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36 Edg/126.0.0.0",
];

/// Round-robins over a pool of desktop browser User-Agents.
#[derive(Debug)]
pub struct RotatingUserAgent {
    pool: Vec<String>,
    next: AtomicUsize,
}

impl Default for RotatingUserAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl RotatingUserAgent {
    /// Rotate over the built-in desktop pool.
    pub fn new() -> Self {
        Self::with_pool(DESKTOP_AGENTS.iter().map(|s| s.to_string()).collect())
    }

    /// Rotate over a custom pool. An empty pool falls back to the built-in one.
    pub fn with_pool(pool: Vec<String>) -> Self {
        let pool = if pool.is_empty() {
            DESKTOP_AGENTS.iter().map(|s| s.to_string()).collect()
        } else {
            pool
        };
        Self {
            pool,
            next: AtomicUsize::new(0),
        }
    }
}

impl UserAgentSource for RotatingUserAgent {
    fn user_agent(&self) -> String {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.pool.len();
        self.pool[idx].clone()
    }
}
