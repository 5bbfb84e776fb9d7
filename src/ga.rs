//! Genetic operators: tournament selection, rule-level uniform crossover,
//! and per-rule condition/action mutation.

use crate::condition::Condition;
use crate::encoding::Encoding;
use crate::error::{LcsError, Result};
use crate::indiv::Indiv;
use crate::interval::ObsValue;
use crate::params::LcsParams;
use crate::rng::RandomNumberGenerator;
use crate::rule::Action;

const MIN_TOURN_SIZE: usize = 2;

/// Draws `tourn_size` individuals independently and uniformly at random
/// (with replacement) and returns the one with the highest fitness.
///
/// Every candidate must carry an assessed fitness; an unset fitness
/// propagates as an error because ranking on it would be meaningless.
pub fn tournament_selection<'a, T: ObsValue>(
    pop: &'a [Indiv<T>],
    tourn_size: usize,
    rng: &mut RandomNumberGenerator,
) -> Result<&'a Indiv<T>> {
    if pop.is_empty() {
        return Err(LcsError::EmptyPopulation);
    }
    if tourn_size < MIN_TOURN_SIZE {
        return Err(LcsError::Configuration(format!(
            "tourn_size must be at least {}, got {}",
            MIN_TOURN_SIZE, tourn_size
        )));
    }

    let mut best = &pop[rng.index(pop.len())];
    let mut best_fitness = best.fitness()?;
    for _ in 1..tourn_size {
        let indiv = &pop[rng.index(pop.len())];
        let fitness = indiv.fitness()?;
        if fitness > best_fitness {
            best = indiv;
            best_fitness = fitness;
        }
    }
    Ok(best)
}

/// Breeds two children from two (already deep-copied) parents.
///
/// With probability `p_cross`, rule-level uniform crossover swaps the rules
/// at each slot independently with probability `p_cross_swap`; otherwise
/// both parents are cloned unchanged. Both branches construct new `Indiv`
/// values, so each child carries a fresh id and a cleared fitness.
pub fn crossover<T: ObsValue>(
    parent_a: Indiv<T>,
    parent_b: Indiv<T>,
    params: &LcsParams,
    rng: &mut RandomNumberGenerator,
) -> Result<(Indiv<T>, Indiv<T>)> {
    let num_rules = params.indiv_size();
    if parent_a.len() != num_rules || parent_b.len() != num_rules {
        return Err(LcsError::Configuration(format!(
            "parents carry {} and {} rules, expected indiv_size = {}",
            parent_a.len(),
            parent_b.len(),
            num_rules
        )));
    }

    let selectable_actions = parent_a.selectable_actions().to_vec();
    let mut child_a_rules = parent_a.into_rules();
    let mut child_b_rules = parent_b.into_rules();

    if rng.gen_bool(params.p_cross()) {
        for idx in 0..num_rules {
            if rng.gen_bool(params.p_cross_swap()) {
                std::mem::swap(&mut child_a_rules[idx], &mut child_b_rules[idx]);
            }
        }
    }

    let child_a = Indiv::new(child_a_rules, selectable_actions.clone());
    let child_b = Indiv::new(child_b_rules, selectable_actions);
    Ok((child_a, child_b))
}

/// Mutates the condition and action of every rule in `indiv`, replacing
/// both wholesale on the rule.
pub fn mutate<E: Encoding>(
    indiv: &mut Indiv<E::Allele>,
    encoding: &E,
    params: &LcsParams,
    rng: &mut RandomNumberGenerator,
) -> Result<()> {
    let selectable_actions = indiv.selectable_actions().to_vec();
    for rule in indiv.rules_mut() {
        let mut_alleles = encoding.mutate_condition_alleles(
            rule.condition().alleles(),
            params.p_mut(),
            rng,
        )?;
        let mut_condition = Condition::new(mut_alleles, encoding)?;
        let mut_action =
            mutate_action(rule.action(), &selectable_actions, params.p_mut(), rng);
        rule.set_condition(mut_condition);
        rule.set_action(mut_action);
    }
    Ok(())
}

/// With probability `p_mut`, a uniformly random *different* action; the
/// current action is never re-selected when alternatives exist.
fn mutate_action(
    action: Action,
    selectable_actions: &[Action],
    p_mut: f64,
    rng: &mut RandomNumberGenerator,
) -> Action {
    if selectable_actions.len() > 1 && rng.gen_bool(p_mut) {
        let other_actions: Vec<Action> = selectable_actions
            .iter()
            .copied()
            .filter(|&a| a != action)
            .collect();
        match rng.choose(&other_actions) {
            Some(&other) => other,
            None => action,
        }
    } else {
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::IntegerUnorderedBoundEncoding;
    use crate::env::PerfAssessment;
    use crate::interval::Dimension;
    use crate::rule::Rule;

    fn encoding() -> IntegerUnorderedBoundEncoding {
        IntegerUnorderedBoundEncoding::new(vec![Dimension::new(0, 9)]).unwrap()
    }

    fn make_indiv(
        encoding: &IntegerUnorderedBoundEncoding,
        params: &LcsParams,
        rng: &mut RandomNumberGenerator,
        fitness: Option<f64>,
    ) -> Indiv<i32> {
        let rules = (0..params.indiv_size())
            .map(|slot| {
                let alleles = encoding.init_condition_alleles(rng);
                let condition = Condition::new(alleles, encoding).unwrap();
                Rule::new(condition, slot % 2, params, rng)
            })
            .collect();
        let mut indiv = Indiv::new(rules, vec![0, 1]);
        if let Some(perf) = fitness {
            indiv.set_perf_assessment_res(PerfAssessment::from_returns(vec![perf]).unwrap());
        }
        indiv
    }

    #[test]
    fn test_oversized_tournament_finds_the_fittest() {
        let encoding = encoding();
        let params = LcsParams::builder().indiv_size(2).build().unwrap();
        let mut rng = RandomNumberGenerator::from_seed(59);
        let pop: Vec<Indiv<i32>> = (0..4)
            .map(|i| make_indiv(&encoding, &params, &mut rng, Some(i as f64)))
            .collect();
        let best_id = pop[3].id();
        // a tournament much larger than the population sees the best with
        // probability 1 - (3/4)^64 under any seed
        for _ in 0..20 {
            let winner = tournament_selection(&pop, 64, &mut rng).unwrap();
            assert_eq!(winner.id(), best_id);
        }
    }

    #[test]
    fn test_tournament_on_unassessed_population_errors() {
        let encoding = encoding();
        let params = LcsParams::builder().indiv_size(2).build().unwrap();
        let mut rng = RandomNumberGenerator::from_seed(61);
        let pop: Vec<Indiv<i32>> = (0..4)
            .map(|_| make_indiv(&encoding, &params, &mut rng, None))
            .collect();
        assert!(matches!(
            tournament_selection(&pop, 2, &mut rng),
            Err(LcsError::UnsetProperty(_))
        ));
    }

    #[test]
    fn test_undersized_tournament_is_rejected() {
        let encoding = encoding();
        let params = LcsParams::builder().indiv_size(2).build().unwrap();
        let mut rng = RandomNumberGenerator::from_seed(67);
        let pop: Vec<Indiv<i32>> = (0..4)
            .map(|_| make_indiv(&encoding, &params, &mut rng, Some(1.0)))
            .collect();
        assert!(matches!(
            tournament_selection(&pop, 1, &mut rng),
            Err(LcsError::Configuration(_))
        ));
    }

    #[test]
    fn test_certain_crossover_swaps_every_rule_slot() {
        let encoding = encoding();
        let params = LcsParams::builder()
            .indiv_size(4)
            .p_cross(1.0)
            .p_cross_swap(1.0)
            .build()
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(71);
        let parent_a = make_indiv(&encoding, &params, &mut rng, None);
        let parent_b = make_indiv(&encoding, &params, &mut rng, None);
        let a_rules = parent_a.rules().to_vec();
        let b_rules = parent_b.rules().to_vec();

        let (child_a, child_b) = crossover(parent_a, parent_b, &params, &mut rng).unwrap();
        assert_eq!(child_a.rules(), b_rules.as_slice());
        assert_eq!(child_b.rules(), a_rules.as_slice());
    }

    #[test]
    fn test_cloning_crossover_keeps_rules_but_renews_identity() {
        let encoding = encoding();
        let params = LcsParams::builder()
            .indiv_size(4)
            .p_cross(0.0)
            .build()
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(73);
        let mut parent_a = make_indiv(&encoding, &params, &mut rng, None);
        let parent_b = make_indiv(&encoding, &params, &mut rng, None);
        parent_a.set_perf_assessment_res(PerfAssessment::from_returns(vec![5.0]).unwrap());
        let a_id = parent_a.id();
        let b_id = parent_b.id();
        let a_rules = parent_a.rules().to_vec();
        let b_rules = parent_b.rules().to_vec();

        let (child_a, child_b) = crossover(parent_a, parent_b, &params, &mut rng).unwrap();
        assert_eq!(child_a.rules(), a_rules.as_slice());
        assert_eq!(child_b.rules(), b_rules.as_slice());
        assert_ne!(child_a.id(), a_id);
        assert_ne!(child_b.id(), b_id);
        assert!(!child_a.has_perf_assessment());
        assert!(!child_b.has_perf_assessment());
    }

    #[test]
    fn test_crossover_rejects_wrong_rule_counts() {
        let encoding = encoding();
        let params = LcsParams::builder().indiv_size(4).build().unwrap();
        let mut rng = RandomNumberGenerator::from_seed(79);
        let parent_a = make_indiv(&encoding, &params, &mut rng, None);
        let parent_b = make_indiv(&encoding, &params, &mut rng, None);
        let bigger = LcsParams::builder().indiv_size(5).build().unwrap();
        assert!(matches!(
            crossover(parent_a, parent_b, &bigger, &mut rng),
            Err(LcsError::Configuration(_))
        ));
    }

    #[test]
    fn test_mutation_with_zero_p_mut_is_a_no_op() {
        let encoding = encoding();
        let params = LcsParams::builder()
            .indiv_size(4)
            .p_mut(0.0)
            .build()
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(83);
        let mut indiv = make_indiv(&encoding, &params, &mut rng, None);
        let rules_before = indiv.rules().to_vec();
        mutate(&mut indiv, &encoding, &params, &mut rng).unwrap();
        assert_eq!(indiv.rules(), rules_before.as_slice());
    }

    #[test]
    fn test_action_mutation_never_reselects_the_current_action() {
        let mut rng = RandomNumberGenerator::from_seed(89);
        for _ in 0..200 {
            let mutated = mutate_action(1, &[0, 1, 2], 1.0, &mut rng);
            assert_ne!(mutated, 1);
            assert!([0, 2].contains(&mutated));
        }
    }

    #[test]
    fn test_action_mutation_with_a_single_action_keeps_it() {
        let mut rng = RandomNumberGenerator::from_seed(97);
        assert_eq!(mutate_action(0, &[0], 1.0, &mut rng), 0);
    }
}
