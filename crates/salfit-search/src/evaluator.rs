//! Monte-Carlo evaluator
//!
//! Scores a [`Model`] by simulating salaries from it and measuring how far
//! the simulated quartiles land from the reference, profile by profile.

use crate::model::Model;
use crate::sampler::SalarySampler;
use crate::SearchError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use salfit_domain::{relative_error, ErrorBounds, StatType, StatisticsDataset};
use serde::Serialize;

/// Outcome of one evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Envelope of every relative error; the score candidates are ranked by
    pub score: ErrorBounds,
    /// Envelope of the Q1 errors alone
    pub q1: ErrorBounds,
    /// Envelope of the mean errors alone
    pub mean: ErrorBounds,
    /// Envelope of the Q3 errors alone
    pub q3: ErrorBounds,
    /// Simulated statistics per reference profile
    pub measured: StatisticsDataset,
}

impl Evaluation {
    /// Per-statistic envelope
    pub fn bounds(&self, stat: StatType) -> &ErrorBounds {
        match stat {
            StatType::Q1 => &self.q1,
            StatType::Mean => &self.mean,
            StatType::Q3 => &self.q3,
        }
    }

    /// Flat, serializable view of the envelopes
    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary {
            min_error: self.score.min(),
            max_error: self.score.max(),
            q1_max_error: self.q1.max(),
            mean_max_error: self.mean.max(),
            q3_max_error: self.q3.max(),
        }
    }
}

/// Relative errors of an evaluation as plain numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationSummary {
    /// Smallest error over every profile and statistic
    pub min_error: f64,
    /// Largest error over every profile and statistic
    pub max_error: f64,
    /// Largest Q1 error
    pub q1_max_error: f64,
    /// Largest mean error
    pub mean_max_error: f64,
    /// Largest Q3 error
    pub q3_max_error: f64,
}

/// Seeded Monte-Carlo scorer against a fixed reference dataset
#[derive(Debug, Clone)]
pub struct MonteCarloEvaluator {
    reference: StatisticsDataset,
    seed: u64,
    samples_per_profile: usize,
}

impl MonteCarloEvaluator {
    /// Create an evaluator
    ///
    /// Fails with [`SearchError::EmptyReference`] when `reference` has no profile.
    pub fn new(reference: StatisticsDataset, seed: u64, samples_per_profile: usize) -> Result<Self, SearchError> {
        if reference.is_empty() {
            return Err(SearchError::EmptyReference);
        }
        if samples_per_profile == 0 {
            return Err(SearchError::Config("samples_per_profile must be at least 1".to_string()));
        }
        Ok(Self {
            reference,
            seed,
            samples_per_profile,
        })
    }

    /// Target dataset
    pub fn reference(&self) -> &StatisticsDataset {
        &self.reference
    }

    /// Score a model
    ///
    /// The generator is re-seeded on every call, so a model always gets the
    /// same score and two models are compared on the same random draws.
    pub fn evaluate(&self, model: &Model) -> Result<Evaluation, SearchError> {
        self.evaluate_dataset(&model.dataset)
    }

    /// Score predicted statistics per unit profile, whatever produced them
    pub fn evaluate_dataset(&self, predicted: &StatisticsDataset) -> Result<Evaluation, SearchError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let salaries = SalarySampler::new(&mut rng).create_salaries_dataset(predicted, self.samples_per_profile);

        let mut evaluation = Evaluation {
            score: ErrorBounds::undefined(),
            q1: ErrorBounds::undefined(),
            mean: ErrorBounds::undefined(),
            q3: ErrorBounds::undefined(),
            measured: StatisticsDataset::new(),
        };

        for (profile, target) in self.reference.iter() {
            let actual = salaries.filter_on_profile(profile).to_statistics()?;
            for stat in StatType::ALL {
                let error = relative_error(actual.get(stat), target.get(stat))?;
                evaluation.score = evaluation.score.refine(error);
                let per_type = match stat {
                    StatType::Q1 => &mut evaluation.q1,
                    StatType::Mean => &mut evaluation.mean,
                    StatType::Q3 => &mut evaluation.q3,
                };
                *per_type = per_type.refine(error);
            }
            evaluation.measured.insert(*profile, actual);
        }

        Ok(evaluation)
    }
}
