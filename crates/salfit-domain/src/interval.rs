//! Year interval module

use crate::DomainError;
use std::fmt;
use std::ops::RangeInclusive;

/// Closed interval of whole years `[start, stop]`
///
/// Used for both seniority and experience. Intervals order by `start`, then
/// by `stop`, which is the canonical order used wherever iteration order
/// matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    start: i32,
    stop: i32,
}

impl Interval {
    /// Create a new interval
    ///
    /// # Panics
    /// Panics if `start > stop`
    pub fn new(start: i32, stop: i32) -> Self {
        assert!(start <= stop, "Interval start must be <= stop");
        Self { start, stop }
    }

    /// Create a new interval, rejecting `start > stop`
    pub fn try_new(start: i32, stop: i32) -> Result<Self, DomainError> {
        if start > stop {
            return Err(DomainError::InvalidInterval { start, stop });
        }
        Ok(Self { start, stop })
    }

    /// Interval covering a single year
    pub fn single(year: i32) -> Self {
        Self { start: year, stop: year }
    }

    /// First year (inclusive)
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Last year (inclusive)
    pub fn stop(&self) -> i32 {
        self.stop
    }

    /// Check whether `other` lies entirely inside this interval
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && self.stop >= other.stop
    }

    /// Every year covered by the interval
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.stop
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.stop {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.stop)
        }
    }
}
