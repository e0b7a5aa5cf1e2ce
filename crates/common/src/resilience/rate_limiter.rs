//! Fixed-window rate limiting
//!
//! Counts requests per key (typically a client address) inside consecutive
//! windows of fixed length. The first request from a key opens its window;
//! once `max_requests` have been admitted the key is rejected until the
//! window ends.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use super::{Clock, SystemClock};

/// Windows kept before a check sweeps out expired ones.
const PRUNE_THRESHOLD: usize = 1024;

/// Configuration for the fixed-window limiter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedWindowConfig {
    /// Requests admitted per key per window
    pub max_requests: u64,
    /// Window length
    pub window: Duration,
}

impl Default for FixedWindowConfig {
    fn default() -> Self {
        Self { max_requests: 100, window: Duration::from_secs(15 * 60) }
    }
}

impl FixedWindowConfig {
    pub fn builder() -> FixedWindowConfigBuilder {
        FixedWindowConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_requests == 0 {
            return Err("max_requests must be greater than 0".to_string());
        }
        if self.window.is_zero() {
            return Err("window must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Builder for FixedWindowConfig
#[derive(Debug, Default)]
pub struct FixedWindowConfigBuilder {
    config: FixedWindowConfig,
}

impl FixedWindowConfigBuilder {
    pub fn max_requests(mut self, max_requests: u64) -> Self {
        self.config.max_requests = max_requests;
        self
    }

    pub fn window(mut self, window: Duration) -> Self {
        self.config.window = window;
        self
    }

    pub fn build(self) -> Result<FixedWindowConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Outcome of a single admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    /// Requests still admissible in the current window
    pub remaining: u64,
    /// Time until the current window closes
    pub reset_after: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u64,
}

/// Per-key fixed-window limiter
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use zanalytics_common::resilience::{FixedWindowConfig, FixedWindowLimiter};
///
/// let config = FixedWindowConfig::builder()
///     .max_requests(2)
///     .window(Duration::from_secs(60))
///     .build()
///     .unwrap();
/// let limiter = FixedWindowLimiter::new(config).unwrap();
///
/// assert!(limiter.check("10.0.0.1").allowed);
/// assert!(limiter.check("10.0.0.1").allowed);
/// assert!(!limiter.check("10.0.0.1").allowed);
/// assert!(limiter.check("10.0.0.2").allowed);
/// ```
pub struct FixedWindowLimiter<K, C: Clock = SystemClock> {
    config: FixedWindowConfig,
    windows: Arc<Mutex<HashMap<K, Window>>>,
    clock: Arc<C>,
}

impl<K: Eq + Hash + Clone> FixedWindowLimiter<K, SystemClock> {
    /// Create a limiter backed by the system clock
    pub fn new(config: FixedWindowConfig) -> Result<Self, String> {
        Self::with_clock(config, SystemClock)
    }
}

impl<K: Eq + Hash + Clone, C: Clock> FixedWindowLimiter<K, C> {
    /// Create a limiter with a custom clock
    pub fn with_clock(config: FixedWindowConfig, clock: C) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config, windows: Arc::new(Mutex::new(HashMap::new())), clock: Arc::new(clock) })
    }

    pub fn config(&self) -> &FixedWindowConfig {
        &self.config
    }

    /// Count one request for `key` and report whether it is admitted.
    ///
    /// Rejected requests do not extend or reset the window.
    pub fn check<Q>(&self, key: &Q) -> RateDecision
    where
        Q: ToOwned<Owned = K> + ?Sized,
    {
        let now = self.clock.now();
        let mut windows = self.windows.lock();

        if windows.len() >= PRUNE_THRESHOLD {
            Self::prune_locked(&mut windows, now, self.config.window);
        }

        let key = key.to_owned();
        let window = windows.entry(key).or_insert(Window { started: now, count: 0 });
        if now.duration_since(window.started) >= self.config.window {
            *window = Window { started: now, count: 0 };
        }

        let reset_after = self.config.window.saturating_sub(now.duration_since(window.started));

        if window.count >= self.config.max_requests {
            debug!(count = window.count, "rate limit: window exhausted");
            return RateDecision { allowed: false, remaining: 0, reset_after };
        }

        window.count += 1;
        RateDecision {
            allowed: true,
            remaining: self.config.max_requests - window.count,
            reset_after,
        }
    }

    /// Drop windows that have already closed.
    pub fn prune(&self) {
        let now = self.clock.now();
        Self::prune_locked(&mut self.windows.lock(), now, self.config.window);
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().len()
    }

    /// Forget all windows
    pub fn reset(&self) {
        self.windows.lock().clear();
    }

    fn prune_locked(windows: &mut HashMap<K, Window>, now: Instant, length: Duration) {
        windows.retain(|_, w| now.duration_since(w.started) < length);
    }
}

impl<K, C: Clock> Clone for FixedWindowLimiter<K, C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            windows: Arc::clone(&self.windows),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::MockClock;
    use super::*;

    fn limiter(max: u64, clock: MockClock) -> FixedWindowLimiter<String, MockClock> {
        let config = FixedWindowConfig { max_requests: max, window: Duration::from_secs(60) };
        FixedWindowLimiter::with_clock(config, clock).unwrap()
    }

    #[test]
    fn admits_up_to_max_then_rejects() {
        let limiter = limiter(3, MockClock::new());

        assert_eq!(limiter.check("a").remaining, 2);
        assert_eq!(limiter.check("a").remaining, 1);
        assert_eq!(limiter.check("a").remaining, 0);

        let rejected = limiter.check("a");
        assert!(!rejected.allowed);
        assert_eq!(rejected.remaining, 0);
    }

    #[test]
    fn keys_are_counted_independently() {
        let limiter = limiter(1, MockClock::new());

        assert!(limiter.check("a").allowed);
        assert!(!limiter.check("a").allowed);
        assert!(limiter.check("b").allowed);
    }

    #[test]
    fn window_reopens_after_its_length() {
        let clock = MockClock::new();
        let limiter = limiter(1, clock.clone());

        assert!(limiter.check("a").allowed);
        clock.advance_secs(59);
        let rejected = limiter.check("a");
        assert!(!rejected.allowed);
        assert_eq!(rejected.reset_after, Duration::from_secs(1));

        clock.advance_secs(1);
        assert!(limiter.check("a").allowed);
    }

    #[test]
    fn rejected_requests_do_not_extend_window() {
        let clock = MockClock::new();
        let limiter = limiter(1, clock.clone());

        assert!(limiter.check("a").allowed);
        for _ in 0..5 {
            clock.advance_secs(10);
            assert!(!limiter.check("a").allowed);
        }
        clock.advance_secs(10);
        assert!(limiter.check("a").allowed);
    }

    #[test]
    fn prune_drops_closed_windows() {
        let clock = MockClock::new();
        let limiter = limiter(5, clock.clone());

        limiter.check("a");
        limiter.check("b");
        assert_eq!(limiter.tracked_keys(), 2);

        clock.advance_secs(61);
        limiter.prune();
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn clones_share_state() {
        let limiter = limiter(1, MockClock::new());
        let other = limiter.clone();

        assert!(limiter.check("a").allowed);
        assert!(!other.check("a").allowed);
    }

    #[test]
    fn config_validation() {
        assert!(FixedWindowConfig::builder().max_requests(0).build().is_err());
        assert!(FixedWindowConfig::builder().window(Duration::ZERO).build().is_err());
        assert!(FixedWindowConfig::builder().max_requests(10).build().is_ok());
    }
}
