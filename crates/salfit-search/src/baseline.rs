//! Reference-factor baseline
//!
//! The simplest model family: the reference itself, split into unit
//! profiles and scaled by one factor shared by every profile and statistic.
//! Searching the factor gives the score an affine fit has to beat.

use crate::evaluator::{Evaluation, MonteCarloEvaluator};
use crate::search::{IterationOutcome, RunBudget};
use crate::{SearchConfig, SearchError, SearchMetrics};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use salfit_domain::{ErrorBounds, StatisticsDataset};
use std::time::Instant;
use tracing::{debug, info};

/// Factor every baseline search starts from
pub const INITIAL_FACTOR: f64 = 1.0;

/// Reference statistics, split once, scaled on demand
#[derive(Debug, Clone)]
pub struct ReferenceFactorModel {
    units: StatisticsDataset,
}

impl ReferenceFactorModel {
    /// Split `reference` into the unit profiles models are resolved on
    pub fn from_reference(reference: &StatisticsDataset) -> Self {
        Self {
            units: reference.split_profiles(),
        }
    }

    /// Every unit profile with its statistics multiplied by `factor`
    pub fn create(&self, factor: f64) -> StatisticsDataset {
        self.units.factor(|_, _| factor)
    }

    /// Shift `factor` by a uniform draw in `[-0.5, 0.5)`
    pub fn adapt<R: Rng>(factor: f64, rng: &mut R) -> f64 {
        factor + (rng.gen::<f64>() - 0.5)
    }
}

/// Best factor found so far
#[derive(Debug, Clone, PartialEq)]
pub struct FactorFit {
    /// Scalar applied to the reference
    pub factor: f64,
    /// Its evaluation
    pub evaluation: Evaluation,
}

impl FactorFit {
    /// Score the fit is ranked by
    pub fn score(&self) -> &ErrorBounds {
        &self.evaluation.score
    }
}

/// Hill climbing over the reference factor
pub struct FactorSearch {
    model: ReferenceFactorModel,
    evaluator: MonteCarloEvaluator,
    rng: StdRng,
    best: Option<FactorFit>,
    metrics: SearchMetrics,
}

impl FactorSearch {
    /// Create a baseline search against `reference`
    pub fn new(reference: StatisticsDataset, config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let model = ReferenceFactorModel::from_reference(&reference);
        let evaluator = MonteCarloEvaluator::new(reference, config.seed, config.samples_per_profile)?;
        Ok(Self {
            model,
            evaluator,
            rng: StdRng::seed_from_u64(config.seed),
            best: None,
            metrics: SearchMetrics::new(),
        })
    }

    /// Best fit so far, `None` before the first iteration
    pub fn best(&self) -> Option<&FactorFit> {
        self.best.as_ref()
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }

    /// Evaluator the factors are scored with
    pub fn evaluator(&self) -> &MonteCarloEvaluator {
        &self.evaluator
    }

    /// Score `factor` without touching the search state
    pub fn evaluate(&self, factor: f64) -> Result<Evaluation, SearchError> {
        self.evaluator.evaluate_dataset(&self.model.create(factor))
    }

    /// Propose a factor, score it and keep it when strictly better
    pub fn iterate(&mut self) -> Result<IterationOutcome, SearchError> {
        let iteration = self.metrics.iterations + 1;
        let factor = match &self.best {
            None => INITIAL_FACTOR,
            Some(best) => ReferenceFactorModel::adapt(best.factor, &mut self.rng),
        };

        let evaluation = self.evaluate(factor)?;
        self.metrics.record_iteration();
        let score = evaluation.score;
        debug!("Baseline iteration {}: factor {} scored {}", iteration, factor, score);

        let improved = self
            .best
            .as_ref()
            .map_or(true, |best| score.is_better_than(best.score()));
        if improved {
            info!("Baseline iteration {}: new best factor {} {}", iteration, factor, score);
            self.metrics.record_improvement(score);
            self.best = Some(FactorFit { factor, evaluation });
        }

        Ok(IterationOutcome {
            iteration,
            improved,
            score,
        })
    }

    /// Iterate until `budget` is exhausted
    pub fn run(&mut self, budget: RunBudget) -> Result<SearchMetrics, SearchError> {
        let start = Instant::now();
        let mut done = 0;
        while !budget.is_exhausted(done) {
            self.iterate()?;
            done += 1;
        }
        self.metrics.total_runtime_secs += start.elapsed().as_secs();
        Ok(self.metrics.clone())
    }
}
