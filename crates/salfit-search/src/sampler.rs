//! Normal salary sampler

use rand::Rng;
use rand_distr::StandardNormal;
use salfit_domain::{SalariesDataset, Statistics, StatisticsDataset};

/// Interquartile range of the standard normal distribution, rounded
pub const NORMAL_IQR: f64 = 1.35;

/// Draws salaries from `N(mean, ((Q3 - Q1) / 1.35)^2)` per profile
#[derive(Debug)]
pub struct SalarySampler<'a, R: Rng> {
    rng: &'a mut R,
}

impl<'a, R: Rng> SalarySampler<'a, R> {
    /// Sample through an externally owned generator
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    /// Standard deviation implied by a quartile triple
    pub fn standard_deviation(statistics: &Statistics) -> f64 {
        (statistics.q3 - statistics.q1) / NORMAL_IQR
    }

    /// Draw `count` salaries for one triple
    pub fn sample(&mut self, statistics: &Statistics, count: usize) -> Vec<f64> {
        let deviation = Self::standard_deviation(statistics);
        (0..count)
            .map(|_| {
                let x: f64 = self.rng.sample(StandardNormal);
                deviation * x + statistics.mean
            })
            .collect()
    }

    /// Draw `count` salaries for every profile, in canonical profile order
    pub fn create_salaries_dataset(&mut self, model: &StatisticsDataset, count: usize) -> SalariesDataset {
        let mut salaries = SalariesDataset::new();
        for (profile, statistics) in model.iter() {
            salaries.extend(*profile, self.sample(statistics, count));
        }
        salaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use salfit_domain::{Interval, Profile};

    fn model() -> StatisticsDataset {
        [
            (
                Profile::new(Interval::single(0), Interval::single(1)),
                Statistics::new(29.731, 34.062, 38.942),
            ),
            (
                Profile::new(Interval::single(0), Interval::single(2)),
                Statistics::new(31.465, 35.797, 40.640),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_standard_deviation() {
        let stats = Statistics::new(10.0, 20.0, 23.5);
        assert!((SalarySampler::<StdRng>::standard_deviation(&stats) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_spread_is_constant() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = SalarySampler::new(&mut rng).sample(&Statistics::new(5.0, 5.0, 5.0), 10);
        assert_eq!(samples, vec![5.0; 10]);
    }

    #[test]
    fn test_sample_moments() {
        let mut rng = StdRng::seed_from_u64(0);
        let stats = Statistics::new(30.0, 35.0, 40.0);
        let samples = SalarySampler::new(&mut rng).sample(&stats, 20_000);
        let estimated = salfit_domain::quantile::estimate(&samples).unwrap();
        assert!((estimated.mean - stats.mean).abs() < 0.2);
        assert!((estimated.q1 - stats.q1).abs() < 0.3);
        assert!((estimated.q3 - stats.q3).abs() < 0.3);
    }

    #[test]
    fn test_dataset_is_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first = SalarySampler::new(&mut a).create_salaries_dataset(&model(), 100);
        let second = SalarySampler::new(&mut b).create_salaries_dataset(&model(), 100);
        assert_eq!(first, second);
        assert_eq!(first.salaries_count(), 200);
    }
}
