//! Configuration for search runs
//!
//! Defines the random seed, Monte-Carlo sample size and the adaptation
//! parameters of the mutation operators.

use crate::SearchError;
use serde::{Deserialize, Serialize};

/// Configuration for a hill-climbing search
///
/// # Examples
///
/// ```
/// use salfit_search::SearchConfig;
///
/// // Default configuration (matches the reference runs)
/// let config = SearchConfig::default();
/// assert_eq!(config.samples_per_profile, 10_000);
///
/// // Fast, noisier evaluations
/// let config = SearchConfig::quick();
/// assert_eq!(config.samples_per_profile, 1_000);
///
/// // Slow, finer evaluations
/// let config = SearchConfig::thorough();
/// assert_eq!(config.samples_per_profile, 50_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Seed of both the mutation engine and the Monte-Carlo evaluator
    /// Default: 0
    #[serde(default)]
    pub seed: u64,

    /// Salaries drawn per model profile at each evaluation
    /// Default: 10000
    #[serde(default = "default_samples_per_profile")]
    pub samples_per_profile: usize,

    /// Lowest scale power an operator can shrink to (amplitude 2^min)
    /// Default: -30
    #[serde(default = "default_scale_min")]
    pub scale_min: i32,

    /// Highest scale power an operator can grow to (amplitude 2^max)
    /// Operators start at this power.
    /// Default: 5
    #[serde(default = "default_scale_max")]
    pub scale_max: i32,

    /// Inertia of the success ratio moving average, in (0, 1)
    /// Default: 0.9
    #[serde(default = "default_inertia")]
    pub inertia: f64,

    /// Success ratio every operator starts with, in [0, 1]
    /// Default: 0.5
    #[serde(default = "default_initial_success_ratio")]
    pub initial_success_ratio: f64,
}

fn default_samples_per_profile() -> usize {
    10_000
}

fn default_scale_min() -> i32 {
    -30
}

fn default_scale_max() -> i32 {
    5
}

fn default_inertia() -> f64 {
    0.9
}

fn default_initial_success_ratio() -> f64 {
    0.5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            samples_per_profile: default_samples_per_profile(),
            scale_min: default_scale_min(),
            scale_max: default_scale_max(),
            inertia: default_inertia(),
            initial_success_ratio: default_initial_success_ratio(),
        }
    }
}

impl SearchConfig {
    /// Fast configuration: fewer samples, coarser minimum step
    ///
    /// Suitable for smoke runs and tests; scores are noisier.
    pub fn quick() -> Self {
        Self {
            samples_per_profile: 1_000,
            scale_min: -12,
            ..Self::default()
        }
    }

    /// Thorough configuration: more samples, slower adaptation
    pub fn thorough() -> Self {
        Self {
            samples_per_profile: 50_000,
            inertia: 0.95,
            ..Self::default()
        }
    }

    /// Check that every field is usable
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.samples_per_profile == 0 {
            return Err(SearchError::Config(
                "samples_per_profile must be at least 1".to_string(),
            ));
        }
        if self.scale_min > self.scale_max {
            return Err(SearchError::Config(format!(
                "scale_min ({}) must be <= scale_max ({})",
                self.scale_min, self.scale_max
            )));
        }
        if !(self.inertia > 0.0 && self.inertia < 1.0) {
            return Err(SearchError::Config(format!(
                "inertia must be in (0, 1), got {}",
                self.inertia
            )));
        }
        if !(0.0..=1.0).contains(&self.initial_success_ratio) {
            return Err(SearchError::Config(format!(
                "initial_success_ratio must be in [0, 1], got {}",
                self.initial_success_ratio
            )));
        }
        Ok(())
    }

    /// Adaptation parameters handed to the mutation engine
    pub fn adaptation(&self) -> crate::AdaptationConfig {
        crate::AdaptationConfig {
            scale_min: self.scale_min,
            scale_max: self.scale_max,
            inertia: self.inertia,
            initial_success_ratio: self.initial_success_ratio,
        }
    }
}
