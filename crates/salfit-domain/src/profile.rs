//! Profile module - population segments keyed by seniority and experience

use crate::Interval;
use std::fmt;

/// A (seniority, experience) pair identifying a population segment
///
/// Profiles are map keys. The derived ordering compares seniority first, then
/// experience, each by start then stop; all datasets iterate in this order so
/// that seeded sampling is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Profile {
    /// Years spent in the current company
    pub seniority: Interval,
    /// Years of professional experience
    pub experience: Interval,
}

impl Profile {
    /// Create a new profile
    pub fn new(seniority: Interval, experience: Interval) -> Self {
        Self { seniority, experience }
    }

    /// Check whether `other` is a sub-segment of this profile
    pub fn contains(&self, other: &Profile) -> bool {
        self.seniority.contains(&other.seniority) && self.experience.contains(&other.experience)
    }

    /// Expand into one profile per seniority year and experience year
    pub fn split_units(&self) -> impl Iterator<Item = Profile> + '_ {
        self.seniority.years().flat_map(move |seniority| {
            self.experience
                .years()
                .map(move |experience| Profile::new(Interval::single(seniority), Interval::single(experience)))
        })
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(sen={}, exp={})", self.seniority, self.experience)
    }
}
