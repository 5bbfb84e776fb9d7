//! Inference: turning an individual's rule set into an action decision.
//!
//! A single inference call computes the match set, partitions it into
//! per-action buckets, resolves conflicts by maximum rule strength on the
//! augmented observation, and returns the chosen action together with its
//! full bucket (the winning action set, the credit-assignment target for
//! the learning update).
//!
//! `None` is the no-action sentinel: no rule matched, the decision is
//! truncated, and callers end the rollout. Ties between actions of equal
//! maximum strength resolve to the lowest action label (ascending bucket
//! iteration with strictly-greater replacement).

use std::collections::BTreeMap;

use crate::indiv::Indiv;
use crate::interval::ObsValue;
use crate::learning::augment_obs;
use crate::rule::Action;

/// Runs inference and returns only the chosen action.
pub fn infer_action<T: ObsValue>(
    indiv: &Indiv<T>,
    obs: &[T],
    x_nought: f64,
) -> Option<Action> {
    infer_action_and_action_set(indiv, obs, x_nought).map(|(action, _)| action)
}

/// Runs inference and returns the chosen action plus the winning action set
/// as rule indices into the individual.
pub fn infer_action_and_action_set<T: ObsValue>(
    indiv: &Indiv<T>,
    obs: &[T],
    x_nought: f64,
) -> Option<(Action, Vec<usize>)> {
    let match_set = gen_match_set(indiv, obs);
    if match_set.is_empty() {
        return None;
    }

    // partition into per-action buckets over the full selectable-action
    // set; the BTreeMap's key order fixes the tie-break
    let mut action_sets: BTreeMap<Action, Vec<usize>> = indiv
        .selectable_actions()
        .iter()
        .map(|&action| (action, Vec::new()))
        .collect();
    for &idx in &match_set {
        let action = indiv.rules()[idx].action();
        action_sets.entry(action).or_default().push(idx);
    }

    let mut reprd_actions = action_sets
        .iter()
        .filter(|(_, bucket)| !bucket.is_empty())
        .map(|(&action, _)| action);
    let sole_action = reprd_actions.next();
    let is_action_conflict = reprd_actions.next().is_some();

    let best_action = if is_action_conflict {
        // use strength to resolve the conflict
        let aug_obs = augment_obs(obs, x_nought);
        let mut best: Option<(Action, f64)> = None;
        for (&action, bucket) in &action_sets {
            if bucket.is_empty() {
                continue;
            }
            let max_strength = bucket
                .iter()
                .map(|&idx| indiv.rules()[idx].strength(&aug_obs))
                .fold(f64::NEG_INFINITY, f64::max);
            best = match best {
                Some((_, strength)) if max_strength > strength => {
                    Some((action, max_strength))
                }
                Some(current) => Some(current),
                None => Some((action, max_strength)),
            };
        }
        best.map(|(action, _)| action)?
    } else {
        // sole action represented
        sole_action?
    };

    let action_set = action_sets.remove(&best_action).unwrap_or_default();
    Some((best_action, action_set))
}

fn gen_match_set<T: ObsValue>(indiv: &Indiv<T>, obs: &[T]) -> Vec<usize> {
    indiv
        .rules()
        .iter()
        .enumerate()
        .filter(|(_, rule)| rule.does_match(obs))
        .map(|(idx, _)| idx)
        .collect()
}
