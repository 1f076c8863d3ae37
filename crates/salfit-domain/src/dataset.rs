//! Profile-keyed datasets
//!
//! Both datasets are backed by a `BTreeMap`, so iteration always follows the
//! canonical profile order (seniority, then experience).

use crate::{quantile, DomainError, Profile, StatType, Statistics};
use std::collections::BTreeMap;

/// Quartile triples per profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsDataset {
    data: BTreeMap<Profile, Statistics>,
}

impl StatisticsDataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the triple of a profile
    pub fn insert(&mut self, profile: Profile, statistics: Statistics) {
        self.data.insert(profile, statistics);
    }

    /// Get the triple of a profile
    pub fn get(&self, profile: &Profile) -> Option<&Statistics> {
        self.data.get(profile)
    }

    /// Iterate entries in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&Profile, &Statistics)> {
        self.data.iter()
    }

    /// Iterate profiles in canonical order
    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.data.keys()
    }

    /// Number of profiles
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the dataset has no profile
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Keep the entries whose profile is contained in `profile`
    pub fn filter_on_profile(&self, profile: &Profile) -> Self {
        self.data
            .iter()
            .filter(|(key, _)| profile.contains(key))
            .map(|(key, stats)| (*key, *stats))
            .collect()
    }

    /// Expand every aggregated profile into unit-year profiles
    ///
    /// Each unit profile inherits the statistics of its aggregate. When
    /// aggregates overlap, the one visited last in canonical order wins.
    pub fn split_profiles(&self) -> Self {
        self.data
            .iter()
            .flat_map(|(profile, stats)| profile.split_units().map(move |unit| (unit, *stats)))
            .collect()
    }

    /// Multiply every value by a per-profile, per-type factor
    pub fn factor(&self, factor: impl Fn(&Profile, StatType) -> f64) -> Self {
        self.data
            .iter()
            .map(|(profile, stats)| (*profile, stats.factor(|stat| factor(profile, stat))))
            .collect()
    }
}

impl FromIterator<(Profile, Statistics)> for StatisticsDataset {
    fn from_iter<I: IntoIterator<Item = (Profile, Statistics)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

/// Raw salary samples per profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalariesDataset {
    data: BTreeMap<Profile, Vec<f64>>,
}

impl SalariesDataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Append samples to a profile
    pub fn extend(&mut self, profile: Profile, salaries: impl IntoIterator<Item = f64>) {
        self.data.entry(profile).or_default().extend(salaries);
    }

    /// Samples of a single profile
    pub fn get(&self, profile: &Profile) -> Option<&[f64]> {
        self.data.get(profile).map(Vec::as_slice)
    }

    /// Iterate entries in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&Profile, &[f64])> {
        self.data.iter().map(|(profile, salaries)| (profile, salaries.as_slice()))
    }

    /// Total number of samples across all profiles
    pub fn salaries_count(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }

    /// Keep the entries whose profile is contained in `profile`
    pub fn filter_on_profile(&self, profile: &Profile) -> Self {
        Self {
            data: self
                .data
                .iter()
                .filter(|(key, _)| profile.contains(key))
                .map(|(key, salaries)| (*key, salaries.clone()))
                .collect(),
        }
    }

    /// Empirical quartile triple over every sample of the dataset
    pub fn to_statistics(&self) -> Result<Statistics, DomainError> {
        let salaries: Vec<f64> = self.data.values().flatten().copied().collect();
        quantile::estimate(&salaries)
    }
}

impl FromIterator<(Profile, Vec<f64>)> for SalariesDataset {
    fn from_iter<I: IntoIterator<Item = (Profile, Vec<f64>)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interval;

    fn profile(sen: (i32, i32), exp: (i32, i32)) -> Profile {
        Profile::new(Interval::new(sen.0, sen.1), Interval::new(exp.0, exp.1))
    }

    fn reference() -> StatisticsDataset {
        [
            (profile((0, 1), (1, 1)), Statistics::new(29.731, 34.062, 38.942)),
            (profile((0, 1), (2, 5)), Statistics::new(31.465, 35.797, 40.640)),
            (profile((2, 5), (1, 1)), Statistics::new(29.837, 34.125, 38.948)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_filter_on_profile() {
        let filtered = reference().filter_on_profile(&profile((0, 1), (1, 5)));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.get(&profile((2, 5), (1, 1))).is_none());
    }

    #[test]
    fn test_split_profiles_inherits_statistics() {
        let split = reference().split_profiles();
        // 2x1 + 2x4 + 4x1 unit profiles
        assert_eq!(split.len(), 14);
        assert_eq!(
            split.get(&profile((1, 1), (4, 4))),
            Some(&Statistics::new(31.465, 35.797, 40.640))
        );
        assert!(split
            .profiles()
            .all(|p| p.seniority.start() == p.seniority.stop() && p.experience.start() == p.experience.stop()));
    }

    #[test]
    fn test_factor_per_profile() {
        let doubled_senior = reference().factor(|profile, _| if profile.seniority.start() >= 2 { 2.0 } else { 1.0 });
        assert_eq!(
            doubled_senior.get(&profile((2, 5), (1, 1))),
            Some(&Statistics::new(59.674, 68.25, 77.896))
        );
        assert_eq!(
            doubled_senior.get(&profile((0, 1), (1, 1))),
            Some(&Statistics::new(29.731, 34.062, 38.942))
        );
    }

    #[test]
    fn test_iteration_is_canonical() {
        let profiles: Vec<Profile> = reference().profiles().copied().collect();
        let mut sorted = profiles.clone();
        sorted.sort();
        assert_eq!(profiles, sorted);
    }

    #[test]
    fn test_salaries_to_statistics_pools_profiles() {
        let mut salaries = SalariesDataset::new();
        salaries.extend(profile((0, 0), (1, 1)), (1..=50).map(f64::from));
        salaries.extend(profile((1, 1), (1, 1)), (51..=100).map(f64::from));
        salaries.extend(profile((3, 3), (1, 1)), [1000.0]);

        let pooled = salaries.filter_on_profile(&profile((0, 1), (1, 1)));
        assert_eq!(pooled.salaries_count(), 100);

        let stats = pooled.to_statistics().unwrap();
        assert_eq!(stats, Statistics::new(25.75, 50.5, 75.25));
    }

    #[test]
    fn test_empty_salaries() {
        let salaries = SalariesDataset::new();
        assert_eq!(salaries.to_statistics(), Err(DomainError::EmptyDataset));
    }
}
