//! Salfit Domain Layer
//!
//! This crate contains the statistical primitives the curve-fitting engine is
//! built on. It performs no I/O and holds no random state: everything here is
//! a value type or a pure function.
//!
//! ## Key Concepts
//!
//! - **Interval**: a closed range of whole years
//! - **Profile**: a (seniority, experience) population segment, the key of every dataset
//! - **Statistics**: a (Q1, mean, Q3) salary summary
//! - **Datasets**: profile-keyed statistics or raw salary samples
//! - **ErrorBounds**: the [min, max] envelope of relative errors of one evaluation
//!
//! ## Determinism
//!
//! Profiles have a total order (seniority, then experience) and every dataset
//! iterates in that order. Seeded Monte-Carlo sampling upstream relies on it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dataset;
pub mod error;
pub mod error_bounds;
pub mod interval;
pub mod profile;
pub mod quantile;
pub mod statistics;
pub mod traits;

// Re-exports for convenience
pub use dataset::{SalariesDataset, StatisticsDataset};
pub use error::DomainError;
pub use error_bounds::{relative_error, ErrorBounds};
pub use interval::Interval;
pub use profile::Profile;
pub use statistics::{StatType, Statistics};
pub use traits::ReferenceDataProvider;
