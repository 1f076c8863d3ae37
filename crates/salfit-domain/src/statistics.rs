//! Quartile triple module

use std::fmt;

/// Selects one field of a quartile triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatType {
    /// First quartile
    Q1,
    /// Arithmetic mean
    Mean,
    /// Third quartile
    Q3,
}

impl StatType {
    /// All statistic types, in comparison order
    pub const ALL: [StatType; 3] = [StatType::Q1, StatType::Mean, StatType::Q3];

    /// Get the statistic name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            StatType::Q1 => "Q1",
            StatType::Mean => "mean",
            StatType::Q3 => "Q3",
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Salary summary of a profile: first quartile, mean, third quartile
///
/// `q1 <= mean <= q3` is expected but not enforced. Values are computed
/// eagerly, so a triple is always a frozen snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// First quartile
    pub q1: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Third quartile
    pub q3: f64,
}

impl Statistics {
    /// Triple of zeros
    pub const ZEROS: Statistics = Statistics { q1: 0.0, mean: 0.0, q3: 0.0 };

    /// Create a new triple
    pub fn new(q1: f64, mean: f64, q3: f64) -> Self {
        Self { q1, mean, q3 }
    }

    /// Read the field selected by `stat`
    pub fn get(&self, stat: StatType) -> f64 {
        match stat {
            StatType::Q1 => self.q1,
            StatType::Mean => self.mean,
            StatType::Q3 => self.q3,
        }
    }

    /// Build a new triple by mapping every field
    pub fn transform(&self, f: impl Fn(StatType, f64) -> f64) -> Self {
        Self {
            q1: f(StatType::Q1, self.q1),
            mean: f(StatType::Mean, self.mean),
            q3: f(StatType::Q3, self.q3),
        }
    }

    /// Multiply every field by its own factor
    pub fn factor(&self, factor: impl Fn(StatType) -> f64) -> Self {
        self.transform(|stat, value| factor(stat) * value)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q1={:.3} mean={:.3} Q3={:.3}", self.q1, self.mean, self.q3)
    }
}
