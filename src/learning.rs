//! Payoff learning: normalised least mean squares on rule weight vectors
//! plus an exponential payoff-variance trace.

use crate::error::{LcsError, Result};
use crate::interval::ObsValue;
use crate::rule::Rule;

/// Prepends the constant bias component to an observation.
pub fn augment_obs<T: ObsValue>(obs: &[T], x_nought: f64) -> Vec<f64> {
    let mut aug_obs = Vec::with_capacity(obs.len() + 1);
    aug_obs.push(x_nought);
    aug_obs.extend(obs.iter().map(|&component| component.into()));
    aug_obs
}

/// Credits every rule in `action_set` (rule indices into `rules`) with the
/// realised `payoff` for the observation the set fired on.
///
/// The normalisation term is the sum of squares of the augmented
/// observation; a zero term is a degenerate observation configuration and
/// surfaces as an arithmetic error rather than being skipped.
pub fn update_action_set<T: ObsValue>(
    rules: &mut [Rule<T>],
    action_set: &[usize],
    payoff: f64,
    obs: &[T],
    eta: f64,
    x_nought: f64,
) -> Result<()> {
    let aug_obs = augment_obs(obs, x_nought);
    let norm: f64 = aug_obs.iter().map(|x| x * x).sum();
    if norm == 0.0 {
        return Err(LcsError::Arithmetic(
            "zero normalisation term for augmented observation".to_string(),
        ));
    }
    for &idx in action_set {
        let rule = rules.get_mut(idx).ok_or_else(|| {
            LcsError::Configuration(format!(
                "action set references rule index {} beyond rule count",
                idx
            ))
        })?;
        rule.update_payoff(payoff, &aug_obs, norm, eta)?;
    }
    Ok(())
}
