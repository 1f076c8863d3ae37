//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::StatisticsDataset;

/// Trait for supplying the reference statistics a search fits against
///
/// Implemented by the outer layer (salfit-cli: built-in table, TOML file).
/// The returned dataset is treated as immutable ground truth for a whole run.
pub trait ReferenceDataProvider {
    /// Error type for provider operations
    type Error;

    /// Load the reference dataset
    fn reference_statistics(&self) -> Result<StatisticsDataset, Self::Error>;
}
