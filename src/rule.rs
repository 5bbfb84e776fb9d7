//! Rules: a condition-action pair with a linear payoff predictor and
//! payoff-variance statistics.

use std::fmt::{self, Display};

use crate::condition::Condition;
use crate::error::{LcsError, Result};
use crate::interval::ObsValue;
use crate::params::LcsParams;
use crate::rng::RandomNumberGenerator;

/// Discrete action label.
pub type Action = usize;

const INIT_PAYOFF_VAR: f64 = 0.0;
const INIT_PAYOFF_STDEV: f64 = 0.0;

/// A single classifier rule.
///
/// The structural fields (`condition`, `action`) are replaced wholesale by
/// mutation, never edited in place; the statistical fields (`weight_vec`,
/// `payoff_var`, `payoff_stdev`) are updated in place across the rollouts
/// of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule<T> {
    condition: Condition<T>,
    action: Action,
    weight_vec: Vec<f64>,
    payoff_var: f64,
    payoff_stdev: f64,
}

impl<T: ObsValue> Rule<T> {
    /// Creates a rule with weights drawn uniformly from
    /// `[weight_i_min, weight_i_max]`.
    ///
    /// The weight vector has one entry per observation feature plus one for
    /// the augmented bias term.
    pub fn new(
        condition: Condition<T>,
        action: Action,
        params: &LcsParams,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        let num_features = condition.len();
        let weight_vec = (0..=num_features)
            .map(|_| rng.uniform(params.weight_i_min(), params.weight_i_max()))
            .collect();
        Self {
            condition,
            action,
            weight_vec,
            payoff_var: INIT_PAYOFF_VAR,
            payoff_stdev: INIT_PAYOFF_STDEV,
        }
    }

    pub fn condition(&self) -> &Condition<T> {
        &self.condition
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn weight_vec(&self) -> &[f64] {
        &self.weight_vec
    }

    pub fn payoff_var(&self) -> f64 {
        self.payoff_var
    }

    pub fn payoff_stdev(&self) -> f64 {
        self.payoff_stdev
    }

    /// Replaces the condition wholesale (mutation).
    pub fn set_condition(&mut self, condition: Condition<T>) {
        self.condition = condition;
    }

    /// Replaces the action wholesale (mutation).
    pub fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    pub fn does_match(&self, obs: &[T]) -> bool {
        self.condition.does_match(obs)
    }

    /// Linear payoff prediction: dot product of the augmented observation
    /// and the weight vector.
    pub fn prediction(&self, aug_obs: &[f64]) -> f64 {
        debug_assert_eq!(aug_obs.len(), self.weight_vec.len());
        aug_obs
            .iter()
            .zip(&self.weight_vec)
            .map(|(x, w)| x * w)
            .sum()
    }

    /// Prediction penalised by the rule's own payoff volatility; used to
    /// resolve action conflicts during inference.
    pub fn strength(&self, aug_obs: &[f64]) -> f64 {
        self.prediction(aug_obs) - self.payoff_stdev
    }

    /// One normalised-least-mean-squares step plus the exponential
    /// variance trace, crediting this rule with `payoff`.
    ///
    /// The variance update uses the pre-update prediction. Non-finite
    /// results surface as an arithmetic error rather than corrupting the
    /// rule silently.
    pub(crate) fn update_payoff(
        &mut self,
        payoff: f64,
        aug_obs: &[f64],
        norm: f64,
        eta: f64,
    ) -> Result<()> {
        let pred = self.prediction(aug_obs);
        let error = payoff - pred;
        let correction = (eta / norm) * error;
        for (w, x) in self.weight_vec.iter_mut().zip(aug_obs) {
            *w += x * correction;
        }
        // v_i = (1 - c)*v_i + c*(mu_i - r)^2
        self.payoff_var = (1.0 - eta) * self.payoff_var + eta * (pred - payoff).powi(2);
        self.payoff_stdev = self.payoff_var.sqrt();

        if !self.payoff_var.is_finite() || self.weight_vec.iter().any(|w| !w.is_finite()) {
            return Err(LcsError::Arithmetic(format!(
                "non-finite payoff statistics after update with payoff {}",
                payoff
            )));
        }
        Ok(())
    }
}

impl<T: ObsValue + Display> Display for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.condition, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::IntegerUnorderedBoundEncoding;
    use crate::interval::Dimension;

    fn make_rule(action: Action) -> Rule<i32> {
        let encoding =
            IntegerUnorderedBoundEncoding::new(vec![Dimension::new(0, 9)]).unwrap();
        let condition = Condition::new(vec![2, 7], &encoding).unwrap();
        let params = LcsParams::default();
        let mut rng = RandomNumberGenerator::from_seed(1);
        Rule::new(condition, action, &params, &mut rng)
    }

    #[test]
    fn test_weight_vec_is_features_plus_one() {
        let rule = make_rule(0);
        assert_eq!(rule.weight_vec().len(), 2);
    }

    #[test]
    fn test_prediction_is_dot_product() {
        let mut rule = make_rule(0);
        rule.weight_vec = vec![0.5, 2.0];
        let aug_obs = [10.0, 3.0];
        assert!((rule.prediction(&aug_obs) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_strength_penalises_payoff_stdev() {
        let mut rule = make_rule(0);
        rule.weight_vec = vec![0.5, 2.0];
        rule.payoff_stdev = 1.5;
        let aug_obs = [10.0, 3.0];
        assert!((rule.strength(&aug_obs) - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_does_match_delegates_to_condition() {
        let rule = make_rule(0);
        assert!(rule.does_match(&[5]));
        assert!(!rule.does_match(&[9]));
    }

    #[test]
    fn test_rule_equality_covers_statistics() {
        let a = make_rule(0);
        let mut b = a.clone();
        assert_eq!(a, b);
        b.payoff_var = 1.0;
        assert_ne!(a, b);
    }
}
