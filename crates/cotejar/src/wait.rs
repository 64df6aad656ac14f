//! Polling primitives
//!
//! Localized copy often arrives late: translations load over the network,
//! popups animate in, hydration rewrites text. Every read in this crate
//! therefore polls until it sees something useful or a deadline passes,
//! instead of sampling the page once.

use std::time::{Duration, Instant};

/// Default gap between poll attempts.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 150;

/// Default deadline for a single field read.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;

/// Default deadline for a popup root to appear and become displayed.
pub const DEFAULT_POPUP_TIMEOUT_MS: u64 = 40_000;

/// Default deadline for a control to become enabled.
pub const DEFAULT_ENABLE_TIMEOUT_MS: u64 = 10_000;

/// Deadline and retry cadence for one polled operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Give up after this much elapsed time.
    pub timeout: Duration,
    /// Sleep between attempts.
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl PollOptions {
    /// Options with an explicit deadline and the default interval.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Options with an explicit retry interval.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Millisecond shorthand used throughout scenario defaults.
    #[must_use]
    pub const fn from_millis(timeout_ms: u64, interval_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            interval: Duration::from_millis(interval_ms),
        }
    }
}

/// Run `attempt` until it yields a value or `options.timeout` elapses.
///
/// Always makes at least one attempt, so a zero timeout still samples
/// the page once. Returns `None` on deadline, never an error: callers
/// decide what an absent value means.
pub fn poll_until<T>(options: PollOptions, mut attempt: impl FnMut() -> Option<T>) -> Option<T> {
    let start = Instant::now();
    loop {
        if let Some(value) = attempt() {
            return Some(value);
        }
        if start.elapsed() >= options.timeout {
            return None;
        }
        std::thread::sleep(options.interval);
    }
}
