//! Empirical quartile estimation
//!
//! Quartiles use the hinge position `(n + 3) / 4` on 1-based order statistics.
//! The position is rounded half-to-even to pick `x(idx)`; when the rounded
//! index differs from the exact position, the result is linearly interpolated
//! between `x(idx)` and `x(idx + 1)` using the signed remainder (which can be
//! negative, extrapolating along the same segment). Q1 applies the rule to the
//! samples in ascending order, Q3 to the samples in descending order, which is
//! the ascending rank `(3n + 1) / 4`.

use crate::{DomainError, Statistics};

/// Estimate the (Q1, mean, Q3) triple of a sample collection
pub fn estimate(samples: &[f64]) -> Result<Statistics, DomainError> {
    if samples.is_empty() {
        return Err(DomainError::EmptyDataset);
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let n = sorted.len();

    let q1 = hinge(n, |k| sorted[k - 1]);
    let q3 = hinge(n, |k| sorted[n - k]);

    Ok(Statistics::new(q1, mean(samples)?, q3))
}

/// Arithmetic mean of a sample collection
pub fn mean(samples: &[f64]) -> Result<f64, DomainError> {
    if samples.is_empty() {
        return Err(DomainError::EmptyDataset);
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Evaluate the hinge rule given the 1-based order statistic accessor `x`
fn hinge(n: usize, x: impl Fn(usize) -> f64) -> f64 {
    let position = (n as f64 + 3.0) / 4.0;
    let index = position.round_ties_even();
    let remainder = position - index;
    let index = index as usize;

    if remainder == 0.0 {
        x(index)
    } else {
        // idx + 1 <= n holds for every n >= 2, and n == 1 never has a remainder
        let next = (index + 1).min(n);
        (1.0 - remainder) * x(index) + remainder * x(next)
    }
}
