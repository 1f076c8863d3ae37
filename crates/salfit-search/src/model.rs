//! Models: curves resolved on concrete profiles

use crate::curve::Parameters;
use salfit_domain::{Profile, StatisticsDataset};

/// Parameters together with the statistics they predict per unit profile
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Label shown by reporting sinks
    pub name: String,
    /// Curves the dataset was resolved from
    pub parameters: Parameters,
    /// Predicted quartile triple per unit profile
    pub dataset: StatisticsDataset,
}

/// Resolves parameters on a fixed set of evaluation profiles
#[derive(Debug, Clone)]
pub struct ModelFactory {
    profiles: Vec<Profile>,
}

impl ModelFactory {
    /// Evaluate on every unit profile covered by `reference`
    pub fn from_reference(reference: &StatisticsDataset) -> Self {
        Self {
            profiles: reference.split_profiles().profiles().copied().collect(),
        }
    }

    /// Profiles a model is resolved on, in canonical order
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Resolve `parameters` at each profile's first experience year
    pub fn create(&self, name: impl Into<String>, parameters: Parameters) -> Model {
        let dataset = self
            .profiles
            .iter()
            .map(|profile| (*profile, parameters.resolve(f64::from(profile.experience.start()))))
            .collect();
        Model {
            name: name.into(),
            parameters,
            dataset,
        }
    }
}
