//! Async worker driving the search loop until interrupted

use crate::{HillClimber, SearchError, SearchMetrics, Solution};

/// Background worker that iterates a [`HillClimber`] until Ctrl+C
///
/// Iterations stay synchronous; the worker only yields to the runtime
/// between them so the shutdown signal can be observed.
///
/// # Examples
///
/// ```no_run
/// use salfit_search::{FitWorker, HillClimber, SearchConfig};
/// # use salfit_domain::StatisticsDataset;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     # let reference = StatisticsDataset::new();
///     let climber = HillClimber::new(reference, &SearchConfig::default())?;
///     let mut worker = FitWorker::new(climber).report_every(100);
///
///     // Run indefinitely (until Ctrl+C)
///     worker.run().await?;
///     Ok(())
/// }
/// ```
pub struct FitWorker {
    climber: HillClimber,
    report_every: usize,
}

impl FitWorker {
    /// Wrap a search loop
    pub fn new(climber: HillClimber) -> Self {
        Self {
            climber,
            report_every: 1000,
        }
    }

    /// Log progress every `iterations` iterations (0 disables)
    pub fn report_every(mut self, iterations: usize) -> Self {
        self.report_every = iterations;
        self
    }

    /// Run until a shutdown signal (Ctrl+C) is received
    ///
    /// # Errors
    ///
    /// Returns the first fatal search error, or [`SearchError::Worker`] if the
    /// signal handler cannot be installed.
    pub async fn run(&mut self) -> Result<(), SearchError> {
        tracing::info!("Fit worker started");

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                signal = &mut shutdown => {
                    signal.map_err(|e| SearchError::Worker(e.to_string()))?;
                    tracing::info!("Shutdown signal received, stopping search");
                    break;
                }
                _ = tokio::task::yield_now() => {
                    self.step()?;
                }
            }
        }

        tracing::info!("Fit worker stopped. Final metrics:\n{}", self.climber.metrics().summary());
        Ok(())
    }

    /// Run a fixed number of iterations (useful for testing)
    pub async fn run_cycles(&mut self, cycles: usize) -> Result<(), SearchError> {
        tracing::info!("Fit worker started for {} iterations", cycles);

        for _ in 0..cycles {
            tokio::task::yield_now().await;
            if let Err(e) = self.step() {
                tracing::error!("Iteration {} failed: {}", self.climber.metrics().iterations + 1, e);
                return Err(e);
            }
        }

        tracing::info!(
            "Fit worker finished {} iterations. Final metrics:\n{}",
            cycles,
            self.climber.metrics().summary()
        );
        Ok(())
    }

    fn step(&mut self) -> Result<(), SearchError> {
        let outcome = self.climber.iterate()?;
        if self.report_every > 0 && outcome.iteration % self.report_every == 0 {
            if let Some(best) = self.climber.best() {
                tracing::info!(
                    "Iteration {}: best {} after {} improvements",
                    outcome.iteration,
                    best.score(),
                    self.climber.metrics().improvements
                );
            }
        }
        Ok(())
    }

    /// Best solution found so far
    pub fn best(&self) -> Option<&Solution> {
        self.climber.best()
    }

    /// Get a reference to the search metrics
    pub fn metrics(&self) -> &SearchMetrics {
        self.climber.metrics()
    }

    /// Give the search loop back
    pub fn into_inner(self) -> HillClimber {
        self.climber
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchConfig;
    use salfit_domain::{Interval, Profile, Statistics, StatisticsDataset};

    fn climber() -> HillClimber {
        let reference: StatisticsDataset = [(
            Profile::new(Interval::single(0), Interval::new(1, 2)),
            Statistics::new(29.731, 34.062, 38.942),
        )]
        .into_iter()
        .collect();
        let config = SearchConfig {
            samples_per_profile: 200,
            ..SearchConfig::default()
        };
        HillClimber::new(reference, &config).unwrap()
    }

    #[tokio::test]
    async fn test_worker_creation() {
        let worker = FitWorker::new(climber());
        assert_eq!(worker.metrics().iterations, 0);
        assert!(worker.best().is_none());
    }

    #[tokio::test]
    async fn test_run_cycles() {
        let mut worker = FitWorker::new(climber()).report_every(2);
        worker.run_cycles(5).await.unwrap();

        assert_eq!(worker.metrics().iterations, 5);
        assert!(worker.best().is_some());
    }

    #[tokio::test]
    async fn test_into_inner_keeps_state() {
        let mut worker = FitWorker::new(climber());
        worker.run_cycles(3).await.unwrap();
        let climber = worker.into_inner();
        assert_eq!(climber.metrics().iterations, 3);
    }
}
