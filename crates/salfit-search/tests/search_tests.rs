//! Integration tests for the search engine

use salfit_domain::{Interval, Profile, Statistics, StatisticsDataset};
use salfit_search::{
    Affine, HillClimber, ModelFactory, MonteCarloEvaluator, Parameters, RunBudget, SearchConfig,
};

/// Two reference profiles sharing seniority 0-1
fn two_profile_reference() -> StatisticsDataset {
    [
        (
            Profile::new(Interval::new(0, 1), Interval::single(1)),
            Statistics::new(29.731, 34.062, 38.942),
        ),
        (
            Profile::new(Interval::new(0, 1), Interval::new(2, 5)),
            Statistics::new(31.465, 35.797, 40.640),
        ),
    ]
    .into_iter()
    .collect()
}

fn quick_config(seed: u64) -> SearchConfig {
    SearchConfig {
        seed,
        samples_per_profile: 300,
        ..SearchConfig::quick()
    }
}

/// Entry and senior-experience profiles of the first seniority band
fn scenario_reference() -> StatisticsDataset {
    [
        (
            Profile::new(Interval::new(0, 1), Interval::single(1)),
            Statistics::new(29.731, 34.062, 38.942),
        ),
        (
            Profile::new(Interval::new(0, 1), Interval::new(10, 14)),
            Statistics::new(39.964, 45.670, 52.082),
        ),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_first_iteration_score_is_pinned() {
    let config = SearchConfig {
        seed: 0,
        samples_per_profile: 10_000,
        ..SearchConfig::default()
    };
    let mut first = HillClimber::new(scenario_reference(), &config).unwrap();
    let mut second = HillClimber::new(scenario_reference(), &config).unwrap();

    let outcome = first.iterate().unwrap();
    assert_eq!(outcome.iteration, 1);
    assert!(outcome.improved);
    assert_eq!(first.best().unwrap().model.parameters, Parameters::initial());
    assert_eq!(outcome.score.max(), 0.9332579631815316);
    assert_eq!(second.iterate().unwrap(), outcome);
}

#[test]
fn test_evaluation_is_reproducible() {
    let reference = two_profile_reference();
    let factory = ModelFactory::from_reference(&reference);
    let evaluator = MonteCarloEvaluator::new(reference, 0, 10_000).unwrap();

    let parameters = Parameters::new(
        Affine::from_slope_intercept(0.5, 29.0),
        Affine::from_slope_intercept(0.5, 33.5),
        Affine::from_slope_intercept(0.6, 38.0),
    );
    let model = factory.create("fitted", parameters);
    assert_eq!(model.dataset.len(), 10);

    let first = evaluator.evaluate(&model).unwrap();
    let second = evaluator.evaluate(&model).unwrap();

    assert_eq!(first, second);
    assert!(first.score.min() <= first.score.max());
    assert_eq!(first.measured.len(), 2);
}

#[test]
fn test_same_seed_same_search() {
    let mut a = HillClimber::new(two_profile_reference(), &quick_config(11)).unwrap();
    let mut b = HillClimber::new(two_profile_reference(), &quick_config(11)).unwrap();

    for _ in 0..60 {
        assert_eq!(a.iterate().unwrap(), b.iterate().unwrap());
    }
    assert_eq!(a.best(), b.best());
    assert_eq!(a.metrics().improvements, b.metrics().improvements);
}

#[test]
fn test_search_improves_on_initial_curves() {
    let mut climber = HillClimber::new(two_profile_reference(), &quick_config(0)).unwrap();
    let initial = climber.iterate().unwrap().score;

    let metrics = climber.run(RunBudget::iterations(200)).unwrap();
    let best = climber.best().unwrap();

    assert_eq!(metrics.iterations, 201);
    assert!(metrics.improvements >= 2);
    assert!(best.score().is_better_than(&initial));
    assert!(best.model.parameters.is_feasible());
}

#[test]
fn test_best_score_never_regresses() {
    let mut climber = HillClimber::new(two_profile_reference(), &quick_config(5)).unwrap();
    let mut best = climber.iterate().unwrap().score;

    for _ in 0..100 {
        let outcome = climber.iterate().unwrap();
        let current = *climber.best().unwrap().score();
        assert!(!best.is_better_than(&current));
        if outcome.improved {
            assert_eq!(current, outcome.score);
        }
        best = current;
    }
}

#[test]
fn test_operator_state_stays_in_bounds() {
    let config = quick_config(3);
    let mut climber = HillClimber::new(two_profile_reference(), &config).unwrap();
    climber.run(RunBudget::iterations(150)).unwrap();

    for (_, state) in climber.engine().adaptations() {
        assert!((config.scale_min..=config.scale_max).contains(&state.scale_power));
        assert!((0.0..=1.0).contains(&state.success_ratio));
    }
}
