//! Error-bounds accumulator
//!
//! Tracks the envelope `[min, max]` of relative errors seen during one
//! evaluation. Bounds only ever widen.

use crate::DomainError;
use std::cmp::Ordering;
use std::fmt;

/// Running `[min, max]` envelope of relative errors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBounds {
    min: f64,
    max: f64,
}

impl ErrorBounds {
    /// Bounds that take the next observation as both endpoints
    pub fn undefined() -> Self {
        Self {
            min: f64::INFINITY,
            max: 0.0,
        }
    }

    /// Smallest error observed
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest error observed
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether at least one error has been observed
    pub fn is_defined(&self) -> bool {
        self.min <= self.max
    }

    /// Widen to include `error`
    #[must_use]
    pub fn refine(self, error: f64) -> Self {
        Self {
            min: self.min.min(error),
            max: self.max.max(error),
        }
    }

    /// Widen to include every error covered by `other`
    #[must_use]
    pub fn extend(self, other: &ErrorBounds) -> Self {
        if !other.is_defined() {
            return self;
        }
        self.refine(other.min).refine(other.max)
    }

    /// Compare badness: lower `max` wins, ties broken by lower `min`
    ///
    /// `Ordering::Less` means `self` is the better score.
    pub fn compare(&self, other: &ErrorBounds) -> Ordering {
        self.max
            .total_cmp(&other.max)
            .then_with(|| self.min.total_cmp(&other.min))
    }

    /// Whether `self` is strictly better than `other`
    pub fn is_better_than(&self, other: &ErrorBounds) -> bool {
        self.compare(other) == Ordering::Less
    }
}

impl Default for ErrorBounds {
    fn default() -> Self {
        Self::undefined()
    }
}

impl fmt::Display for ErrorBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}% ; {:.2}%]", 100.0 * self.min, 100.0 * self.max)
    }
}

/// Relative error `|actual - target| / target`
///
/// A zero target is rejected rather than clamped.
pub fn relative_error(actual: f64, target: f64) -> Result<f64, DomainError> {
    if target == 0.0 {
        return Err(DomainError::DivisionByZero { actual });
    }
    Ok((target - actual).abs() / target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_sets_both_ends() {
        let bounds = ErrorBounds::undefined().refine(0.25);
        assert_eq!(bounds.min(), 0.25);
        assert_eq!(bounds.max(), 0.25);
        assert!(bounds.is_defined());
        assert!(!ErrorBounds::undefined().is_defined());
    }

    #[test]
    fn test_refine_widens() {
        let bounds = ErrorBounds::undefined().refine(0.2).refine(0.05).refine(0.1);
        assert_eq!(bounds.min(), 0.05);
        assert_eq!(bounds.max(), 0.2);
    }

    #[test]
    fn test_extend_merges() {
        let a = ErrorBounds::undefined().refine(0.1).refine(0.3);
        let b = ErrorBounds::undefined().refine(0.02).refine(0.2);
        let merged = a.extend(&b);
        assert_eq!(merged.min(), 0.02);
        assert_eq!(merged.max(), 0.3);
        assert_eq!(a.extend(&ErrorBounds::undefined()), a);
    }

    #[test]
    fn test_compare_max_then_min() {
        let a = ErrorBounds::undefined().refine(0.01).refine(0.1);
        let b = ErrorBounds::undefined().refine(0.001).refine(0.2);
        assert!(a.is_better_than(&b));

        let c = ErrorBounds::undefined().refine(0.005).refine(0.1);
        assert!(c.is_better_than(&a));
        assert!(!a.is_better_than(&a));
    }

    #[test]
    fn test_relative_error() {
        assert_eq!(relative_error(110.0, 100.0).unwrap(), 0.1);
        assert_eq!(relative_error(100.0, 100.0).unwrap(), 0.0);
        assert_eq!(
            relative_error(3.0, 0.0),
            Err(DomainError::DivisionByZero { actual: 3.0 })
        );
    }

    #[test]
    fn test_display() {
        let bounds = ErrorBounds::undefined().refine(0.0123).refine(0.5);
        assert_eq!(bounds.to_string(), "[1.23% ; 50.00%]");
    }
}
