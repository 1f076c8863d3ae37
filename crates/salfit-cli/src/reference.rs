//! Reference dataset providers.
//!
//! Reference files are TOML documents with one `[[profiles]]` table per
//! profile:
//!
//! ```toml
//! [[profiles]]
//! seniority = [0, 1]
//! experience = [2, 5]
//! q1 = 31.465
//! mean = 35.797
//! q3 = 40.640
//! ```

use crate::error::{CliError, Result};
use salfit_domain::{Interval, Profile, ReferenceDataProvider, Statistics, StatisticsDataset};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Salary quartiles (k€) shipped with the binary: seniority 0-1 and 2-5,
/// experience 1, 2-5, 6-9 and 10-14 years.
const BUILTIN: [((i32, i32), (i32, i32), [f64; 3]); 8] = [
    ((0, 1), (1, 1), [29.731, 34.062, 38.942]),
    ((0, 1), (2, 5), [31.465, 35.797, 40.640]),
    ((0, 1), (6, 9), [35.429, 40.476, 46.144]),
    ((0, 1), (10, 14), [39.964, 45.670, 52.082]),
    ((2, 5), (1, 1), [29.837, 34.125, 38.948]),
    ((2, 5), (2, 5), [31.577, 35.863, 40.646]),
    ((2, 5), (6, 9), [35.555, 40.551, 46.152]),
    ((2, 5), (10, 14), [40.107, 45.755, 52.090]),
];

/// Built-in reference dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinReference;

impl ReferenceDataProvider for BuiltinReference {
    type Error = CliError;

    fn reference_statistics(&self) -> Result<StatisticsDataset> {
        BUILTIN
            .iter()
            .map(|&((sen_start, sen_stop), (exp_start, exp_stop), [q1, mean, q3])| -> Result<_> {
                Ok((
                    Profile::new(
                        Interval::try_new(sen_start, sen_stop)?,
                        Interval::try_new(exp_start, exp_stop)?,
                    ),
                    Statistics::new(q1, mean, q3),
                ))
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceFile {
    #[serde(default)]
    profiles: Vec<ReferenceEntry>,
}

#[derive(Debug, Deserialize)]
struct ReferenceEntry {
    seniority: [i32; 2],
    experience: [i32; 2],
    q1: f64,
    mean: f64,
    q3: f64,
}

/// Reference dataset read from a TOML file.
#[derive(Debug, Clone)]
pub struct FileReference {
    path: PathBuf,
}

impl FileReference {
    /// Provider reading `path` on every request.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a reference document.
    pub fn parse(contents: &str) -> Result<StatisticsDataset> {
        let file: ReferenceFile = toml::from_str(contents)?;
        if file.profiles.is_empty() {
            return Err(CliError::Reference("no [[profiles]] entry".to_string()));
        }

        let mut dataset = StatisticsDataset::new();
        for entry in file.profiles {
            let profile = Profile::new(
                Interval::try_new(entry.seniority[0], entry.seniority[1])?,
                Interval::try_new(entry.experience[0], entry.experience[1])?,
            );
            if dataset.get(&profile).is_some() {
                return Err(CliError::Reference(format!("duplicate profile {}", profile)));
            }
            let statistics = Statistics::new(entry.q1, entry.mean, entry.q3);
            if !(statistics.q1 > 0.0 && statistics.q1 <= statistics.mean && statistics.mean <= statistics.q3) {
                return Err(CliError::Reference(format!(
                    "profile {} must satisfy 0 < Q1 <= mean <= Q3, got {}",
                    profile, statistics
                )));
            }
            dataset.insert(profile, statistics);
        }
        Ok(dataset)
    }
}

impl ReferenceDataProvider for FileReference {
    type Error = CliError;

    fn reference_statistics(&self) -> Result<StatisticsDataset> {
        let contents = fs::read_to_string(&self.path)?;
        Self::parse(&contents)
            .map_err(|e| CliError::Reference(format!("{}: {}", self.path.display(), e)))
    }
}

/// Load the reference from `path`, or the built-in dataset when absent.
pub fn load_reference(path: Option<&Path>) -> Result<StatisticsDataset> {
    match path {
        Some(path) => FileReference::new(path).reference_statistics(),
        None => BuiltinReference.reference_statistics(),
    }
}
