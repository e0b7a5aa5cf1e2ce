//! Resilience patterns for the edge of the relay
//!
//! - **Clock**: monotonic time source with a mock for tests
//! - **Fixed-window rate limiter**: per-key request counting

pub mod clock;
pub mod rate_limiter;

pub use clock::{Clock, MockClock, SystemClock};
pub use rate_limiter::{
    FixedWindowConfig, FixedWindowConfigBuilder, FixedWindowLimiter, RateDecision,
};
