//! Randomized delay intervals.

use std::time::Duration;

use rand::Rng;

/// A closed interval that delays are drawn from uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterRange {
    /// Shortest delay
    pub min: Duration,
    /// Longest delay
    pub max: Duration,
}

impl JitterRange {
    /// No delay at all. Useful for tests.
    pub const ZERO: JitterRange = JitterRange {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    /// Builds a range; the bounds are swapped if given in reverse.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Draws a delay uniformly from `[min, max]`.
    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let secs = rand::rng().random_range(self.min.as_secs_f64()..=self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

/// The three delay policies applied by the request executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Throttle after every successful response
    pub request_delay: JitterRange,
    /// Wait after a 429 response
    pub rate_limit_backoff: JitterRange,
    /// Wait after a transport failure, when attempts remain
    pub transport_backoff: JitterRange,
}

impl Pacing {
    /// Pacing with every delay set to zero.
    pub fn none() -> Self {
        Self {
            request_delay: JitterRange::ZERO,
            rate_limit_backoff: JitterRange::ZERO,
            transport_backoff: JitterRange::ZERO,
        }
    }
}
