//! # Environment interface
//!
//! The reinforcement-learning environment is an external collaborator; the
//! core only depends on the contract below. Implementations live with the
//! task being learned (test environments live in test code).
//!
//! `reseed_iod_rng` reseeds only the initial-observation distribution, not
//! the transition dynamics. The training loop clones an environment per
//! individual and reseeds it from the individual's id, which is what makes
//! results invariant to worker count and scheduling order.

use crate::error::{LcsError, Result};
use crate::indiv::Indiv;
use crate::interval::ObsValue;
use crate::rule::Action;

/// One step's outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvResponse<T> {
    pub obs: Vec<T>,
    pub reward: f64,
}

/// Contract of a reinforcement-learning environment.
pub trait Environment: Clone + Send {
    /// Scalar type of one observation component.
    type ObsValue: ObsValue;

    /// The set of selectable action labels.
    fn action_space(&self) -> &[Action];

    /// Starts a new episode and returns the initial observation.
    fn reset(&mut self) -> Vec<Self::ObsValue>;

    /// Applies `action` and returns the next observation and reward.
    fn step(&mut self, action: Action) -> EnvResponse<Self::ObsValue>;

    /// Whether the current episode has ended.
    fn is_terminal(&self) -> bool;

    /// Reseeds the initial-observation distribution only.
    fn reseed_iod_rng(&mut self, seed: u64);
}

/// Result of assessing an individual's performance as a policy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PerfAssessment {
    perf: f64,
    returns: Vec<f64>,
}

impl PerfAssessment {
    /// Builds an assessment from per-rollout discounted returns; `perf` is
    /// their mean.
    pub fn from_returns(returns: Vec<f64>) -> Result<Self> {
        if returns.is_empty() {
            return Err(LcsError::Configuration(
                "performance assessment needs at least one rollout return".to_string(),
            ));
        }
        let perf = returns.iter().sum::<f64>() / returns.len() as f64;
        Ok(Self { perf, returns })
    }

    /// Mean discounted return over the assessment rollouts.
    pub fn perf(&self) -> f64 {
        self.perf
    }

    /// Per-rollout discounted returns.
    pub fn returns(&self) -> &[f64] {
        &self.returns
    }
}

/// Assesses `indiv` as a greedy policy over `num_rollouts` episodes.
///
/// Each episode accumulates the discounted return until the environment is
/// terminal or inference yields no action (a truncated episode keeps the
/// return accumulated so far; truncation is normal, not an error).
pub fn assess_perf<Env>(
    env: &mut Env,
    indiv: &Indiv<Env::ObsValue>,
    num_rollouts: usize,
    gamma: f64,
    x_nought: f64,
) -> Result<PerfAssessment>
where
    Env: Environment,
{
    if num_rollouts == 0 {
        return Err(LcsError::Configuration(
            "num_rollouts must be at least 1".to_string(),
        ));
    }

    let mut returns = Vec::with_capacity(num_rollouts);
    for _ in 0..num_rollouts {
        let mut discounted_return = 0.0;
        let mut discount = 1.0;
        let mut obs = env.reset();
        while !env.is_terminal() {
            match indiv.select_action(&obs, x_nought) {
                Some(action) => {
                    let response = env.step(action);
                    discounted_return += discount * response.reward;
                    discount *= gamma;
                    obs = response.obs;
                }
                None => break,
            }
        }
        returns.push(discounted_return);
    }
    PerfAssessment::from_returns(returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::encoding::IntegerUnorderedBoundEncoding;
    use crate::interval::Dimension;
    use crate::params::LcsParams;
    use crate::rng::RandomNumberGenerator;
    use crate::rule::Rule;

    /// Walk right along [0, limit]; reward 1 per step, terminal at the end.
    #[derive(Debug, Clone)]
    struct WalkEnv {
        pos: i32,
        limit: i32,
        actions: Vec<Action>,
    }

    impl WalkEnv {
        fn new(limit: i32) -> Self {
            Self {
                pos: 0,
                limit,
                actions: vec![0, 1],
            }
        }
    }

    impl Environment for WalkEnv {
        type ObsValue = i32;

        fn action_space(&self) -> &[Action] {
            &self.actions
        }

        fn reset(&mut self) -> Vec<i32> {
            self.pos = 0;
            vec![self.pos]
        }

        fn step(&mut self, action: Action) -> EnvResponse<i32> {
            if action == 1 {
                self.pos = (self.pos + 1).min(self.limit);
            } else {
                self.pos = (self.pos - 1).max(0);
            }
            EnvResponse {
                obs: vec![self.pos],
                reward: 1.0,
            }
        }

        fn is_terminal(&self) -> bool {
            self.pos == self.limit
        }

        fn reseed_iod_rng(&mut self, _seed: u64) {}
    }

    fn full_cover_indiv(encoding: &IntegerUnorderedBoundEncoding, action: Action) -> Indiv<i32> {
        let params = LcsParams::default();
        let mut rng = RandomNumberGenerator::from_seed(101);
        let condition = Condition::new(vec![0, 9], encoding).unwrap();
        Indiv::new(
            vec![Rule::new(condition, action, &params, &mut rng)],
            vec![0, 1],
        )
    }

    #[test]
    fn test_assess_perf_accumulates_discounted_returns() {
        let encoding =
            IntegerUnorderedBoundEncoding::new(vec![Dimension::new(0, 9)]).unwrap();
        let indiv = full_cover_indiv(&encoding, 1);
        let mut env = WalkEnv::new(3);
        let res = assess_perf(&mut env, &indiv, 2, 0.5, 10.0).unwrap();
        // always-right policy: returns 1 + 0.5 + 0.25 per episode
        assert_eq!(res.returns().len(), 2);
        for &ret in res.returns() {
            assert!((ret - 1.75).abs() < 1e-12);
        }
        assert!((res.perf() - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_truncated_rollouts_keep_partial_returns() {
        let encoding =
            IntegerUnorderedBoundEncoding::new(vec![Dimension::new(0, 9)]).unwrap();
        let params = LcsParams::default();
        let mut rng = RandomNumberGenerator::from_seed(103);
        // matches only position 0: after one step right, no rule matches
        let condition = Condition::new(vec![0, 0], &encoding).unwrap();
        let indiv = Indiv::new(
            vec![Rule::new(condition, 1, &params, &mut rng)],
            vec![0, 1],
        );
        let mut env = WalkEnv::new(3);
        let res = assess_perf(&mut env, &indiv, 1, 1.0, 10.0).unwrap();
        assert_eq!(res.returns(), &[1.0]);
    }

    #[test]
    fn test_zero_rollouts_is_a_configuration_error() {
        let encoding =
            IntegerUnorderedBoundEncoding::new(vec![Dimension::new(0, 9)]).unwrap();
        let indiv = full_cover_indiv(&encoding, 1);
        let mut env = WalkEnv::new(3);
        assert!(matches!(
            assess_perf(&mut env, &indiv, 0, 0.5, 10.0),
            Err(LcsError::Configuration(_))
        ));
    }

    #[test]
    fn test_perf_assessment_needs_returns() {
        assert!(PerfAssessment::from_returns(Vec::new()).is_err());
    }
}
