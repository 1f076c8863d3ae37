//! Hill-climbing search loop
//!
//! One [`HillClimber::iterate`] call runs five phases to completion:
//! generate parameters, build the model, evaluate it, keep it if strictly
//! better than the best so far, and feed the outcome back to the mutation
//! engine. Registered [`ReportingSink`]s observe every phase.

use crate::adaptation::MutationEngine;
use crate::curve::Parameters;
use crate::evaluator::{Evaluation, MonteCarloEvaluator};
use crate::model::{Model, ModelFactory};
use crate::{SearchConfig, SearchError, SearchMetrics};
use salfit_domain::{ErrorBounds, StatisticsDataset};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Observer of the search loop
///
/// Every method defaults to a no-op. Errors are logged by the loop and
/// never abort it.
pub trait ReportingSink {
    /// A new iteration begins (1-based)
    fn iteration_started(&mut self, _iteration: usize) -> anyhow::Result<()> {
        Ok(())
    }

    /// Candidate parameters were generated
    fn parameters_generated(&mut self, _parameters: &Parameters) -> anyhow::Result<()> {
        Ok(())
    }

    /// Candidate model was resolved
    fn model_generated(&mut self, _model: &Model) -> anyhow::Result<()> {
        Ok(())
    }

    /// Candidate model was scored
    fn model_scored(&mut self, _model: &Model, _evaluation: &Evaluation) -> anyhow::Result<()> {
        Ok(())
    }

    /// Best solution after the comparison, `improved` when the candidate won
    fn best_selected(&mut self, _best: &Solution, _improved: bool) -> anyhow::Result<()> {
        Ok(())
    }
}

/// A model with its evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Evaluated model
    pub model: Model,
    /// Its evaluation
    pub evaluation: Evaluation,
}

impl Solution {
    /// Score the solution is ranked by
    pub fn score(&self) -> &ErrorBounds {
        &self.evaluation.score
    }
}

/// What one iteration did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationOutcome {
    /// Iteration number (1-based)
    pub iteration: usize,
    /// Whether the candidate became the new best
    pub improved: bool,
    /// Candidate score
    pub score: ErrorBounds,
}

/// When [`HillClimber::run`] stops
#[derive(Debug, Clone, Default)]
pub struct RunBudget {
    /// Stop after this many iterations of the run
    pub max_iterations: Option<usize>,
    /// Stop once this flag is set
    pub cancel: Option<Arc<AtomicBool>>,
}

impl RunBudget {
    /// Run a fixed number of iterations
    pub fn iterations(max_iterations: usize) -> Self {
        Self {
            max_iterations: Some(max_iterations),
            cancel: None,
        }
    }

    /// Run until `cancel` is set
    pub fn until_cancelled(cancel: Arc<AtomicBool>) -> Self {
        Self {
            max_iterations: None,
            cancel: Some(cancel),
        }
    }

    /// Also stop once `cancel` is set
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub(crate) fn is_exhausted(&self, done: usize) -> bool {
        self.max_iterations.is_some_and(|max| done >= max)
            || self
                .cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Sink handle stored by the loop
pub type BoxedSink = Box<dyn ReportingSink + Send>;

/// Monte-Carlo validated hill climber
///
/// # Examples
///
/// ```no_run
/// use salfit_search::{HillClimber, RunBudget, SearchConfig};
/// # use salfit_domain::StatisticsDataset;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let reference = StatisticsDataset::new();
/// let mut climber = HillClimber::new(reference, &SearchConfig::quick())?;
/// let metrics = climber.run(RunBudget::iterations(100))?;
/// println!("{}", metrics.summary());
/// if let Some(best) = climber.best() {
///     println!("{} {}", best.model.parameters, best.score());
/// }
/// # Ok(())
/// # }
/// ```
pub struct HillClimber {
    factory: ModelFactory,
    evaluator: MonteCarloEvaluator,
    engine: MutationEngine,
    best: Option<Solution>,
    sinks: Vec<BoxedSink>,
    metrics: SearchMetrics,
}

impl HillClimber {
    /// Create a search against `reference`
    pub fn new(reference: StatisticsDataset, config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let factory = ModelFactory::from_reference(&reference);
        let evaluator = MonteCarloEvaluator::new(reference, config.seed, config.samples_per_profile)?;
        Ok(Self {
            factory,
            evaluator,
            engine: MutationEngine::new(config.adaptation(), config.seed),
            best: None,
            sinks: Vec::new(),
            metrics: SearchMetrics::new(),
        })
    }

    /// Register a sink
    pub fn add_sink(&mut self, sink: BoxedSink) {
        self.sinks.push(sink);
    }

    /// Best solution so far, `None` before the first iteration
    pub fn best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }

    /// Mutation engine, for inspecting operator state
    pub fn engine(&self) -> &MutationEngine {
        &self.engine
    }

    /// Evaluator the candidates are scored with
    pub fn evaluator(&self) -> &MonteCarloEvaluator {
        &self.evaluator
    }

    /// Run one iteration
    ///
    /// The iteration only counts in the metrics once its candidate is scored.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoApplicableAdaptation`] when no operator can move from
    /// the best solution, and domain errors from evaluation. Both are fatal.
    pub fn iterate(&mut self) -> Result<IterationOutcome, SearchError> {
        let iteration = self.metrics.iterations + 1;
        notify_sinks(&mut self.sinks, &mut self.metrics, "iteration start", |sink| {
            sink.iteration_started(iteration)
        });

        let parameters = match &self.best {
            None => Parameters::initial(),
            Some(best) => self.engine.adapt(&best.model.parameters)?,
        };
        debug!("Iteration {}: parameters {}", iteration, parameters);
        notify_sinks(&mut self.sinks, &mut self.metrics, "parameters", |sink| {
            sink.parameters_generated(&parameters)
        });

        let model = self.factory.create(format!("candidate #{}", iteration), parameters);
        notify_sinks(&mut self.sinks, &mut self.metrics, "model", |sink| sink.model_generated(&model));

        let evaluation = match self.evaluator.evaluate(&model) {
            Ok(evaluation) => evaluation,
            Err(e) => {
                self.engine.discard();
                return Err(e);
            }
        };
        self.metrics.record_iteration();
        debug!("Iteration {}: score {}", iteration, evaluation.score);
        notify_sinks(&mut self.sinks, &mut self.metrics, "score", |sink| {
            sink.model_scored(&model, &evaluation)
        });

        let score = evaluation.score;
        let improved = self
            .best
            .as_ref()
            .map_or(true, |best| score.is_better_than(best.score()));
        if improved {
            self.engine.notify_success();
            info!("Iteration {}: new best {} {}", iteration, score, model.parameters);
            self.metrics.record_improvement(score);
            self.best = Some(Solution { model, evaluation });
        } else {
            self.engine.notify_failure();
        }

        if let Some(best) = self.best.as_ref() {
            notify_sinks(&mut self.sinks, &mut self.metrics, "best", |sink| {
                sink.best_selected(best, improved)
            });
        }

        Ok(IterationOutcome {
            iteration,
            improved,
            score,
        })
    }

    /// Iterate until `budget` is exhausted
    ///
    /// Returns the metrics accumulated since construction.
    pub fn run(&mut self, budget: RunBudget) -> Result<SearchMetrics, SearchError> {
        let start = Instant::now();
        let mut done = 0;
        while !budget.is_exhausted(done) {
            self.iterate()?;
            done += 1;
        }
        self.metrics.total_runtime_secs += start.elapsed().as_secs();
        debug!("Run finished after {} iterations", done);
        Ok(self.metrics.clone())
    }
}

fn notify_sinks(
    sinks: &mut [BoxedSink],
    metrics: &mut SearchMetrics,
    event: &str,
    mut notify: impl FnMut(&mut (dyn ReportingSink + Send)) -> anyhow::Result<()>,
) {
    for sink in sinks.iter_mut() {
        if let Err(e) = notify(sink.as_mut()) {
            metrics.record_sink_failure();
            warn!("Reporting sink failed on {} event: {:#}", event, e);
        }
    }
}
