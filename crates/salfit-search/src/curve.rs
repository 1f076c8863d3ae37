//! Affine curve parameterization
//!
//! Each quartile statistic follows `y = slope * experience + intercept`. Curves
//! are read at a fixed experience window `[EXP_START, EXP_END]`, and edited
//! either directly (slope, intercept) or by pivoting around one window end.

use salfit_domain::StatType;
use std::fmt;

/// First experience year of the fitted window
pub const EXP_START: i32 = 1;

/// Last experience year of the fitted window
pub const EXP_END: i32 = 14;

/// Affine curve `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    /// Increase of `y` per experience year
    pub slope: f64,
    /// Value of `y` at `x = 0`
    pub intercept: f64,
}

impl Affine {
    /// Create a curve from its slope and intercept
    pub fn from_slope_intercept(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Curve whose slope and intercept are the averages of `curves`
    pub fn average<const N: usize>(curves: &[Affine; N]) -> Self {
        const { assert!(N > 0, "cannot average zero curves") };
        let count = N as f64;
        Self {
            slope: curves.iter().map(|c| c.slope).sum::<f64>() / count,
            intercept: curves.iter().map(|c| c.intercept).sum::<f64>() / count,
        }
    }

    /// Evaluate the curve at `x`
    pub fn resolve(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Value at the start of the window
    pub fn start(&self) -> f64 {
        self.resolve(f64::from(EXP_START))
    }

    /// Value at the end of the window
    pub fn end(&self) -> f64 {
        self.resolve(f64::from(EXP_END))
    }

    /// Add `delta` to the slope
    #[must_use]
    pub fn add_slope(&self, delta: f64) -> Self {
        Self::from_slope_intercept(self.slope + delta, self.intercept)
    }

    /// Add `delta` to the intercept (shifts the whole curve)
    #[must_use]
    pub fn add_intercept(&self, delta: f64) -> Self {
        Self::from_slope_intercept(self.slope, self.intercept + delta)
    }

    /// Move the point at `x_move` by `delta` while `x_fix` stays put
    #[must_use]
    pub fn move_point(&self, delta: f64, x_move: i32, x_fix: i32) -> Self {
        let x_fix = f64::from(x_fix);
        let norm_delta = delta / (x_fix - f64::from(x_move));
        Self::from_slope_intercept(self.slope - norm_delta, self.intercept + x_fix * norm_delta)
    }

    /// Pivot edit: move `start()` by `delta`, keep `end()`
    #[must_use]
    pub fn add_start(&self, delta: f64) -> Self {
        self.move_point(delta, EXP_START, EXP_END)
    }

    /// Pivot edit: move `end()` by `delta`, keep `start()`
    #[must_use]
    pub fn add_end(&self, delta: f64) -> Self {
        self.move_point(delta, EXP_END, EXP_START)
    }
}

impl fmt::Display for Affine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*exp+{}", self.slope, self.intercept)
    }
}

/// One affine curve per quartile statistic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// First quartile curve
    pub q1: Affine,
    /// Mean curve
    pub mean: Affine,
    /// Third quartile curve
    pub q3: Affine,
}

impl Parameters {
    /// Bundle three curves
    pub fn new(q1: Affine, mean: Affine, q3: Affine) -> Self {
        Self { q1, mean, q3 }
    }

    /// Starting point of every search: `Q1 = x + 1`, `Q3 = x + 3`, mean halfway
    pub fn initial() -> Self {
        let q1 = Affine::from_slope_intercept(1.0, 1.0);
        let q3 = Affine::from_slope_intercept(1.0, 3.0);
        let mean = Affine::average(&[q1, q3]);
        Self::new(q1, mean, q3)
    }

    /// Curve of a statistic
    pub fn curve(&self, stat: StatType) -> &Affine {
        match stat {
            StatType::Q1 => &self.q1,
            StatType::Mean => &self.mean,
            StatType::Q3 => &self.q3,
        }
    }

    /// Replace the curve of one statistic through `edit`
    #[must_use]
    pub fn map_curve(&self, stat: StatType, edit: impl FnOnce(&Affine) -> Affine) -> Self {
        let mut next = *self;
        let curve = match stat {
            StatType::Q1 => &mut next.q1,
            StatType::Mean => &mut next.mean,
            StatType::Q3 => &mut next.q3,
        };
        *curve = edit(curve);
        next
    }

    /// Pivot the start of one curve
    #[must_use]
    pub fn add_start(&self, stat: StatType, delta: f64) -> Self {
        self.map_curve(stat, |c| c.add_start(delta))
    }

    /// Pivot the end of one curve
    #[must_use]
    pub fn add_end(&self, stat: StatType, delta: f64) -> Self {
        self.map_curve(stat, |c| c.add_end(delta))
    }

    /// Shift one curve
    #[must_use]
    pub fn add_intercept(&self, stat: StatType, delta: f64) -> Self {
        self.map_curve(stat, |c| c.add_intercept(delta))
    }

    /// Tilt one curve around `x = 0`
    #[must_use]
    pub fn add_slope(&self, stat: StatType, delta: f64) -> Self {
        self.map_curve(stat, |c| c.add_slope(delta))
    }

    /// Values of the three curves at experience `x`
    pub fn resolve(&self, x: f64) -> salfit_domain::Statistics {
        salfit_domain::Statistics::new(self.q1.resolve(x), self.mean.resolve(x), self.q3.resolve(x))
    }

    /// Whether `0 <= Q1 < Q3` holds at both window ends
    ///
    /// Only the two ends are checked. Curves whose slopes cross inside the
    /// window can still violate the ordering in between.
    pub fn is_feasible(&self) -> bool {
        self.q1.start() >= 0.0
            && self.q1.start() < self.q3.start()
            && self.q1.end() >= 0.0
            && self.q1.end() < self.q3.end()
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}<Q1<{:.1} | {:.1}<mean<{:.1} | {:.1}<Q3<{:.1}",
            self.q1.start(),
            self.q1.end(),
            self.mean.start(),
            self.mean.end(),
            self.q3.start(),
            self.q3.end()
        )
    }
}
