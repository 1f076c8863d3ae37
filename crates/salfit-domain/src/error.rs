//! Error types for domain operations

use thiserror::Error;

/// Errors raised by the statistical primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Quantile estimation attempted on zero samples
    #[error("Empty dataset: no salary to estimate statistics from")]
    EmptyDataset,

    /// Relative error requested against a zero target
    #[error("Division by zero: relative error of {actual} against a zero target")]
    DivisionByZero {
        /// The measured value
        actual: f64,
    },

    /// Interval built with start after stop
    #[error("Invalid interval: start {start} is after stop {stop}")]
    InvalidInterval {
        /// First year
        start: i32,
        /// Last year
        stop: i32,
    },
}
