//! # Decision caching
//!
//! An optional per-individual cache that memoizes full inference results
//! (chosen action plus winning action set) keyed by the exact observation.
//!
//! The cache is only sound while the individual's rules are not changing:
//! the training loop never consults it during trajectory generation,
//! because rule payoff statistics drift between rollouts. It is intended
//! for querying a settled individual as a policy.
//!
//! Observation scalars must be `Eq + Hash` to key the cache, so it is
//! available for integer observation spaces and unrepresentable for
//! floating-point ones, where "equal" observations differing in negligible
//! precision would collide.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;

use crate::indiv::Indiv;
use crate::inference::infer_action_and_action_set;
use crate::interval::ObsValue;
use crate::rule::Action;

type Decision = Option<(Action, Vec<usize>)>;

/// Memoized inference over one individual's rule set.
#[derive(Debug, Default)]
pub struct DecisionCache<T> {
    cache: Mutex<HashMap<Vec<T>, Decision>>,
}

impl<T> DecisionCache<T>
where
    T: ObsValue + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached decision for `obs`, running full inference on a
    /// miss.
    pub fn infer(
        &self,
        indiv: &Indiv<T>,
        obs: &[T],
        x_nought: f64,
    ) -> Decision {
        let mut cache = self.cache.lock().unwrap();

        if let Some(decision) = cache.get(obs) {
            return decision.clone();
        }

        let decision = infer_action_and_action_set(indiv, obs, x_nought);
        cache.insert(obs.to_vec(), decision.clone());
        decision
    }

    /// Number of memoized observations.
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().unwrap().is_empty()
    }

    /// Drops every memoized decision. Must be called if the individual's
    /// rules change while the cache is retained.
    pub fn clear(&self) {
        self.cache.lock().unwrap().clear();
    }
}
