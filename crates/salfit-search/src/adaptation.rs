//! Adaptive mutation engine
//!
//! A fixed catalogue of [`Operator`]s describes every legal move on a
//! [`Parameters`] value. Operators are plain data; their step-size state lives
//! in a parallel vector of [`AdaptationState`] owned by the [`MutationEngine`].
//!
//! Each operator has its own scale power `p`, and moves by `2^p`. Success
//! grows the step, failure shrinks it, so step sizes anneal geometrically in
//! both directions.

use crate::curve::Parameters;
use crate::SearchError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use salfit_domain::StatType;
use tracing::{debug, trace};

/// Bounds and smoothing of the per-operator step state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptationConfig {
    /// Lowest scale power
    pub scale_min: i32,
    /// Highest scale power, also the starting one
    pub scale_max: i32,
    /// Weight of the past in the success ratio moving average
    pub inertia: f64,
    /// Success ratio of a fresh operator
    pub initial_success_ratio: f64,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            scale_min: -30,
            scale_max: 5,
            inertia: 0.9,
            initial_success_ratio: 0.5,
        }
    }
}

/// Point of a curve an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Pivot around the window end, move the window start
    Start,
    /// Pivot around the window start, move the window end
    End,
    /// Shift the whole curve
    Intercept,
}

/// Named, stateless transform of a [`Parameters`] value
///
/// Every edit adds `coefficient * amplitude` to the given anchor of one curve.
#[derive(Debug, PartialEq)]
pub struct Operator {
    /// Human-readable operator name
    pub name: &'static str,
    /// Edits applied in order
    pub edits: &'static [(StatType, Anchor, f64)],
}

impl Operator {
    /// Apply every edit with the given step amplitude
    pub fn apply(&self, parameters: &Parameters, amplitude: f64) -> Parameters {
        self.edits
            .iter()
            .fold(*parameters, |params, &(stat, anchor, coefficient)| {
                let delta = coefficient * amplitude;
                match anchor {
                    Anchor::Start => params.add_start(stat, delta),
                    Anchor::End => params.add_end(stat, delta),
                    Anchor::Intercept => params.add_intercept(stat, delta),
                }
            })
    }
}

use Anchor::{End, Intercept, Start};
use StatType::{Mean, Q1, Q3};

/// The full operator catalogue
///
/// Families: move the three curves together, compress or extend the Q1..Q3
/// spread symmetrically, and compress or extend it while holding Q1 or Q3.
pub static OPERATORS: [Operator; 24] = [
    Operator {
        name: "move start up",
        edits: &[(Q1, Start, 1.0), (Mean, Start, 1.0), (Q3, Start, 1.0)],
    },
    Operator {
        name: "move start down",
        edits: &[(Q1, Start, -1.0), (Mean, Start, -1.0), (Q3, Start, -1.0)],
    },
    Operator {
        name: "move end up",
        edits: &[(Q1, End, 1.0), (Mean, End, 1.0), (Q3, End, 1.0)],
    },
    Operator {
        name: "move end down",
        edits: &[(Q1, End, -1.0), (Mean, End, -1.0), (Q3, End, -1.0)],
    },
    Operator {
        name: "move all up",
        edits: &[(Q1, Intercept, 1.0), (Mean, Intercept, 1.0), (Q3, Intercept, 1.0)],
    },
    Operator {
        name: "move all down",
        edits: &[(Q1, Intercept, -1.0), (Mean, Intercept, -1.0), (Q3, Intercept, -1.0)],
    },
    Operator {
        name: "compress start",
        edits: &[(Q1, Start, 1.0), (Q3, Start, -1.0)],
    },
    Operator {
        name: "extend start",
        edits: &[(Q1, Start, -1.0), (Q3, Start, 1.0)],
    },
    Operator {
        name: "compress end",
        edits: &[(Q1, End, 1.0), (Q3, End, -1.0)],
    },
    Operator {
        name: "extend end",
        edits: &[(Q1, End, -1.0), (Q3, End, 1.0)],
    },
    Operator {
        name: "compress all",
        edits: &[(Q1, Intercept, 1.0), (Q3, Intercept, -1.0)],
    },
    Operator {
        name: "extend all",
        edits: &[(Q1, Intercept, -1.0), (Q3, Intercept, 1.0)],
    },
    Operator {
        name: "extend start from Q1",
        edits: &[(Mean, Start, 0.5), (Q3, Start, 1.0)],
    },
    Operator {
        name: "extend end from Q1",
        edits: &[(Mean, End, 0.5), (Q3, End, 1.0)],
    },
    Operator {
        name: "extend all from Q1",
        edits: &[(Mean, Intercept, 0.5), (Q3, Intercept, 1.0)],
    },
    Operator {
        name: "compress start to Q1",
        edits: &[(Mean, Start, -0.5), (Q3, Start, -1.0)],
    },
    Operator {
        name: "compress end to Q1",
        edits: &[(Mean, End, -0.5), (Q3, End, -1.0)],
    },
    Operator {
        name: "compress all to Q1",
        edits: &[(Mean, Intercept, -0.5), (Q3, Intercept, -1.0)],
    },
    Operator {
        name: "compress start to Q3",
        edits: &[(Q1, Start, 1.0), (Mean, Start, 0.5)],
    },
    Operator {
        name: "compress end to Q3",
        edits: &[(Q1, End, 1.0), (Mean, End, 0.5)],
    },
    Operator {
        name: "compress all to Q3",
        edits: &[(Q1, Intercept, 1.0), (Mean, Intercept, 0.5)],
    },
    Operator {
        name: "extend start from Q3",
        edits: &[(Q1, Start, -1.0), (Mean, Start, -0.5)],
    },
    Operator {
        name: "extend end from Q3",
        edits: &[(Q1, End, -1.0), (Mean, End, -0.5)],
    },
    Operator {
        name: "extend all from Q3",
        edits: &[(Q1, Intercept, -1.0), (Mean, Intercept, -0.5)],
    },
];

/// Step-size state of one operator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptationState {
    /// Current exponent of the step amplitude
    pub scale_power: i32,
    /// Failures since the last global success
    pub consecutive_failures: u32,
    /// Exponential moving average of outcomes, in [0, 1]
    pub success_ratio: f64,
}

impl AdaptationState {
    /// Fresh state: largest step, configured success ratio
    pub fn new(config: &AdaptationConfig) -> Self {
        Self {
            scale_power: config.scale_max,
            consecutive_failures: 0,
            success_ratio: config.initial_success_ratio,
        }
    }

    /// Current step amplitude `2^scale_power`
    pub fn amplitude(&self) -> f64 {
        2f64.powi(self.scale_power)
    }

    /// Grow the step and raise the success ratio
    pub fn notify_success(&mut self, config: &AdaptationConfig) {
        self.scale_power = (self.scale_power + 1).min(config.scale_max);
        self.success_ratio = self.success_ratio * config.inertia + (1.0 - config.inertia);
    }

    /// Shrink the step and lower the success ratio
    pub fn notify_failure(&mut self, config: &AdaptationConfig) {
        self.scale_power = (self.scale_power - 1).max(config.scale_min);
        self.success_ratio *= config.inertia;
        self.consecutive_failures += 1;
    }

    /// Clear the failure streak
    pub fn forget_failures(&mut self) {
        self.consecutive_failures = 0;
    }
}

/// Generates candidates from the current best and adapts step sizes from feedback
#[derive(Debug)]
pub struct MutationEngine {
    config: AdaptationConfig,
    states: Vec<AdaptationState>,
    rng: StdRng,
    applied: Option<usize>,
}

impl MutationEngine {
    /// Create an engine over the full catalogue
    pub fn new(config: AdaptationConfig, seed: u64) -> Self {
        Self {
            states: vec![AdaptationState::new(&config); OPERATORS.len()],
            config,
            rng: StdRng::seed_from_u64(seed),
            applied: None,
        }
    }

    /// Produce one feasible candidate from `best`
    ///
    /// Every operator is tried at its own amplitude. Operators whose candidate
    /// breaks `0 <= Q1 < Q3` are failed on the spot; one of the remaining
    /// candidates is then picked uniformly and its operator remembered for
    /// [`notify_success`](Self::notify_success) / [`notify_failure`](Self::notify_failure).
    pub fn adapt(&mut self, best: &Parameters) -> Result<Parameters, SearchError> {
        let mut survivors = Vec::with_capacity(OPERATORS.len());
        for (index, (operator, state)) in OPERATORS.iter().zip(self.states.iter_mut()).enumerate() {
            let candidate = operator.apply(best, state.amplitude());
            if candidate.is_feasible() {
                survivors.push((index, candidate));
            } else {
                trace!(operator = operator.name, "Infeasible candidate");
                state.notify_failure(&self.config);
            }
        }

        if survivors.is_empty() {
            self.applied = None;
            return Err(SearchError::NoApplicableAdaptation);
        }

        let (index, candidate) = survivors[self.rng.gen_range(0..survivors.len())];
        debug!(
            operator = OPERATORS[index].name,
            amplitude = self.states[index].amplitude(),
            feasible = survivors.len(),
            "Adaptation chosen"
        );
        self.applied = Some(index);
        Ok(candidate)
    }

    /// The last chosen candidate became the new best
    ///
    /// Clears every failure streak, then rewards the applied operator.
    pub fn notify_success(&mut self) {
        if let Some(index) = self.applied.take() {
            self.states.iter_mut().for_each(AdaptationState::forget_failures);
            self.states[index].notify_success(&self.config);
        }
    }

    /// The last chosen candidate did not beat the best
    pub fn notify_failure(&mut self) {
        if let Some(index) = self.applied.take() {
            self.states[index].notify_failure(&self.config);
        }
    }

    /// Drop the pending operator without feedback, for a candidate that was never scored
    pub fn discard(&mut self) {
        self.applied = None;
    }

    /// Operator chosen by the last [`adapt`](Self::adapt), awaiting feedback
    pub fn applied(&self) -> Option<&'static Operator> {
        self.applied.map(|index| &OPERATORS[index])
    }

    /// Every operator with its current state, in catalogue order
    pub fn adaptations(&self) -> impl Iterator<Item = (&'static Operator, &AdaptationState)> {
        OPERATORS.iter().zip(self.states.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Affine;
    use std::collections::HashSet;

    fn engine() -> MutationEngine {
        MutationEngine::new(AdaptationConfig::default(), 0)
    }

    #[test]
    fn test_catalogue_names_are_unique() {
        let names: HashSet<&str> = OPERATORS.iter().map(|op| op.name).collect();
        assert_eq!(names.len(), 24);
    }

    #[test]
    fn test_operator_apply() {
        let params = Parameters::initial();

        let moved = OPERATORS[0].apply(&params, 2.0); // move start up
        assert!((moved.q1.start() - (params.q1.start() + 2.0)).abs() < 1e-9);
        assert!((moved.q3.end() - params.q3.end()).abs() < 1e-9);

        let extended = OPERATORS[14].apply(&params, 2.0); // extend all from Q1
        assert_eq!(extended.q1, params.q1);
        assert!((extended.mean.intercept - (params.mean.intercept + 1.0)).abs() < 1e-9);
        assert!((extended.q3.intercept - (params.q3.intercept + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_state_bounds() {
        let config = AdaptationConfig {
            scale_min: -2,
            scale_max: 1,
            ..Default::default()
        };
        let mut state = AdaptationState::new(&config);
        assert_eq!(state.scale_power, 1);
        assert_eq!(state.amplitude(), 2.0);

        state.notify_success(&config);
        assert_eq!(state.scale_power, 1);
        assert!((state.success_ratio - 0.55).abs() < 1e-12);

        for _ in 0..10 {
            state.notify_failure(&config);
        }
        assert_eq!(state.scale_power, -2);
        assert_eq!(state.amplitude(), 0.25);
        assert_eq!(state.consecutive_failures, 10);

        state.forget_failures();
        assert_eq!(state.consecutive_failures, 0);
        assert_eq!(state.scale_power, -2);
    }

    #[test]
    fn test_adapt_remembers_operator() {
        let mut engine = engine();
        let best = Parameters::initial();
        for _ in 0..50 {
            engine.adapt(&best).unwrap();
            assert!(engine.applied().is_some());
            engine.notify_failure();
            assert!(engine.applied().is_none());
        }
    }

    #[test]
    fn test_discard_skips_feedback() {
        let mut engine = engine();
        engine.adapt(&Parameters::initial()).unwrap();
        let before: Vec<AdaptationState> = engine.adaptations().map(|(_, state)| *state).collect();

        engine.discard();
        assert!(engine.applied().is_none());
        engine.notify_failure();

        let after: Vec<AdaptationState> = engine.adaptations().map(|(_, state)| *state).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_infeasible_operators_fail_immediately() {
        let mut engine = engine();
        // Amplitude 32 from Q1 = x + 1: every downward move on Q1 goes negative
        engine.adapt(&Parameters::initial()).unwrap();
        let (_, state) = engine
            .adaptations()
            .find(|(op, _)| op.name == "move all down")
            .unwrap();
        assert_eq!(state.scale_power, 4);
        assert_eq!(state.consecutive_failures, 1);
    }

    #[test]
    fn test_no_applicable_adaptation() {
        let mut engine = engine();
        let stuck = Parameters::new(
            Affine::from_slope_intercept(0.0, -100.0),
            Affine::from_slope_intercept(0.0, 0.0),
            Affine::from_slope_intercept(0.0, 100.0),
        );
        assert!(matches!(
            engine.adapt(&stuck),
            Err(SearchError::NoApplicableAdaptation)
        ));
        assert!(engine.applied().is_none());
        assert!(engine.adaptations().all(|(_, s)| s.scale_power == 4 && s.consecutive_failures == 1));
    }

    #[test]
    fn test_success_forgets_all_failures() {
        let mut engine = engine();
        engine.adapt(&Parameters::initial()).unwrap();
        let applied = engine.applied().unwrap().name;
        engine.notify_success();

        assert!(engine.applied().is_none());
        assert!(engine.adaptations().all(|(_, s)| s.consecutive_failures == 0));
        let (_, state) = engine.adaptations().find(|(op, _)| op.name == applied).unwrap();
        assert_eq!(state.scale_power, 5);
        assert!((state.success_ratio - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_failure_only_touches_applied() {
        let mut engine = engine();
        engine.adapt(&Parameters::initial()).unwrap();
        let before: Vec<AdaptationState> = engine.adaptations().map(|(_, s)| *s).collect();
        let applied = engine.applied().unwrap().name;
        engine.notify_failure();

        for ((op, after), before) in engine.adaptations().zip(before) {
            if op.name == applied {
                assert_eq!(after.scale_power, before.scale_power - 1);
                assert_eq!(after.consecutive_failures, before.consecutive_failures + 1);
            } else {
                assert_eq!(*after, before);
            }
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let mut a = engine();
        let mut b = engine();
        let best = Parameters::initial();
        for _ in 0..20 {
            assert_eq!(a.adapt(&best).unwrap(), b.adapt(&best).unwrap());
            a.notify_failure();
            b.notify_failure();
        }
    }
}
