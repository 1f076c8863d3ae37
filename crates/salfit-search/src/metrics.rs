//! Metrics collection for search runs

use salfit_domain::ErrorBounds;

/// Counters collected while the search loop runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchMetrics {
    /// Iterations completed
    pub iterations: usize,

    /// Iterations whose candidate replaced the best
    pub improvements: usize,

    /// Iteration of the last improvement (1-based)
    pub last_improvement: Option<usize>,

    /// Score of the best solution so far
    pub best_score: Option<ErrorBounds>,

    /// Sink notifications that returned an error
    pub sink_failures: usize,

    /// Total runtime in seconds
    pub total_runtime_secs: u64,
}

impl SearchMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed iteration
    pub fn record_iteration(&mut self) {
        self.iterations += 1;
    }

    /// Record a new best score, found at the current iteration
    pub fn record_improvement(&mut self, score: ErrorBounds) {
        self.improvements += 1;
        self.last_improvement = Some(self.iterations);
        self.best_score = Some(score);
    }

    /// Record a sink failure
    pub fn record_sink_failure(&mut self) {
        self.sink_failures += 1;
    }

    /// Fraction of iterations that improved the best, 0 before any iteration
    pub fn improvement_rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.improvements as f64 / self.iterations as f64
        }
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Search Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Iterations: {}", self.iterations),
            format!(
                "Improvements: {} ({:.1}%)",
                self.improvements,
                100.0 * self.improvement_rate()
            ),
            format!("Total runtime: {}s", self.total_runtime_secs),
        ];

        if let Some(iteration) = self.last_improvement {
            lines.push(format!("Last improvement at iteration: {}", iteration));
        }
        if let Some(score) = &self.best_score {
            lines.push(format!("Best score: {}", score));
        }
        if self.sink_failures > 0 {
            lines.push(format!("Sink failures: {}", self.sink_failures));
        }

        lines.join("\n")
    }
}
