//! Salfit Search
//!
//! Monte-Carlo validated hill climbing of affine salary curves.
//!
//! # Overview
//!
//! The engine fits three affine curves (Q1, mean and Q3 as functions of
//! experience) to a reference dataset of salary quartiles:
//! - **Generation**: an adaptive mutation engine proposes a feasible candidate
//!   from the best parameters so far
//! - **Modelling**: the candidate curves are resolved on every unit profile
//! - **Evaluation**: salaries are simulated from the model and re-aggregated
//!   per reference profile; the score is the envelope of relative errors
//! - **Selection**: the candidate replaces the best only when strictly better
//! - **Feedback**: the chosen operator grows or shrinks its step size
//!
//! [`FactorSearch`] runs the same loop over a single factor applied to the
//! reference itself, the baseline an affine fit is compared against.
//!
//! # Usage
//!
//! ## Fixed Budget
//!
//! ```no_run
//! use salfit_search::{HillClimber, RunBudget, SearchConfig};
//! # use salfit_domain::StatisticsDataset;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let reference = StatisticsDataset::new();
//! let mut climber = HillClimber::new(reference, &SearchConfig::default())?;
//! let metrics = climber.run(RunBudget::iterations(1_000))?;
//! println!("{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use salfit_search::{FitWorker, HillClimber, SearchConfig};
//! # use salfit_domain::StatisticsDataset;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     # let reference = StatisticsDataset::new();
//!     let climber = HillClimber::new(reference, &SearchConfig::default())?;
//!     let mut worker = FitWorker::new(climber);
//!
//!     // Run indefinitely (until Ctrl+C)
//!     worker.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! seed = 0
//! samples_per_profile = 10000
//! scale_min = -30
//! scale_max = 5
//! inertia = 0.9
//! initial_success_ratio = 0.5
//! ```
//!
//! # Reproducibility
//!
//! The mutation engine owns one seeded generator consumed sequentially. The
//! evaluator re-seeds its own generator on every call, so identical models
//! always receive identical scores.

#![warn(missing_docs)]

mod adaptation;
mod baseline;
mod config;
mod curve;
mod error;
mod evaluator;
mod metrics;
mod model;
mod sampler;
mod search;
mod worker;

pub use adaptation::{AdaptationConfig, AdaptationState, Anchor, MutationEngine, Operator, OPERATORS};
pub use baseline::{FactorFit, FactorSearch, ReferenceFactorModel, INITIAL_FACTOR};
pub use config::SearchConfig;
pub use curve::{Affine, Parameters, EXP_END, EXP_START};
pub use error::SearchError;
pub use evaluator::{Evaluation, EvaluationSummary, MonteCarloEvaluator};
pub use metrics::SearchMetrics;
pub use model::{Model, ModelFactory};
pub use sampler::{SalarySampler, NORMAL_IQR};
pub use search::{BoxedSink, HillClimber, IterationOutcome, ReportingSink, RunBudget, Solution};
pub use worker::FitWorker;
