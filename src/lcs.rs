//! # Training loop
//!
//! `Lcs` drives the evolution: population initialisation, per-generation
//! breeding, per-individual trajectory-based reinforcement learning, and
//! fitness assessment.
//!
//! The per-individual learning-and-assessment stage is the unit of parallel
//! work. A worker receives an owned individual, clones the environments and
//! reseeds their initial-observation distributions from the individual's
//! id, and returns the fully mutated individual. Nothing mutable is shared
//! across workers, so results are invariant to worker count and scheduling
//! order.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::condition::Condition;
use crate::encoding::Encoding;
use crate::env::{assess_perf, Environment};
use crate::error::{LcsError, Result};
use crate::ga::{crossover, mutate, tournament_selection};
use crate::indiv::Indiv;
use crate::inference::infer_action_and_action_set;
use crate::interval::ObsValue;
use crate::learning::update_action_set;
use crate::params::LcsParams;
use crate::rng::RandomNumberGenerator;
use crate::rule::{Action, Rule};

/// One step of a rollout; produced and consumed within one reinforcement
/// episode. The action set holds rule indices into the episode's
/// individual.
#[derive(Debug, Clone)]
pub struct TrajectoryStep<T> {
    pub obs: Vec<T>,
    pub action: Action,
    pub action_set: Vec<usize>,
    pub reward: f64,
}

/// The classifier system: population state plus everything needed to breed,
/// reinforce, and assess it.
pub struct Lcs<E, Env>
where
    E: Encoding,
    Env: Environment<ObsValue = E::Allele>,
{
    /// Environment for the inner loop: trajectory reinforcements.
    reinf_env: Env,
    /// Environment for perf assessment, feeding GA fitness.
    perf_env: Env,
    encoding: E,
    params: LcsParams,
    rng: RandomNumberGenerator,
    selectable_actions: Vec<Action>,
    pop: Option<Vec<Indiv<E::Allele>>>,
    gen_count: u64,
}

impl<E, Env> Lcs<E, Env>
where
    E: Encoding,
    Env: Environment<ObsValue = E::Allele> + Sync,
{
    /// Validates the configuration and seeds the RNG; the population stays
    /// uninitialised until [`Lcs::init`] runs.
    pub fn new(reinf_env: Env, perf_env: Env, encoding: E, params: LcsParams) -> Result<Self> {
        params.validate()?;
        if reinf_env.action_space() != perf_env.action_space() {
            return Err(LcsError::Configuration(
                "reinforcement and assessment environments expose different action spaces"
                    .to_string(),
            ));
        }
        let selectable_actions = reinf_env.action_space().to_vec();
        if selectable_actions.is_empty() {
            return Err(LcsError::Configuration(
                "environment action space is empty".to_string(),
            ));
        }
        let rng = RandomNumberGenerator::from_seed(params.seed());
        Ok(Self {
            reinf_env,
            perf_env,
            encoding,
            params,
            rng,
            selectable_actions,
            pop: None,
            gen_count: 0,
        })
    }

    pub fn params(&self) -> &LcsParams {
        &self.params
    }

    /// The current population, if initialised.
    pub fn pop(&self) -> Option<&[Indiv<E::Allele>]> {
        self.pop.as_deref()
    }

    /// Builds the initial population and runs the learning-and-assessment
    /// stage on it.
    pub fn init(&mut self) -> Result<&[Indiv<E::Allele>]> {
        let mut pop = Vec::with_capacity(self.params.pop_size());
        for _ in 0..self.params.pop_size() {
            pop.push(self.init_indiv()?);
        }
        let pop = self.run_pop_learning(pop)?;
        info!(
            pop_size = pop.len(),
            best_fitness = best_fitness(&pop)?,
            "population initialised"
        );
        self.pop = Some(pop);
        Ok(self.pop.as_deref().unwrap_or_default())
    }

    /// Runs one generation: breeding via selection, crossover, and
    /// mutation, then the learning-and-assessment stage on the offspring,
    /// which replace the current population.
    pub fn run_gen(&mut self) -> Result<&[Indiv<E::Allele>]> {
        let pop_size = self.params.pop_size();
        let num_breeding_rounds = pop_size / 2;

        let mut new_pop = Vec::with_capacity(pop_size);
        {
            let pop = match &self.pop {
                Some(pop) => pop,
                None => {
                    return Err(LcsError::Configuration(
                        "population not initialised; call init() first".to_string(),
                    ))
                }
            };
            for _ in 0..num_breeding_rounds {
                // parents are deep-copied so the current population is
                // never aliased by the offspring being built
                let parent_a =
                    tournament_selection(pop, self.params.tourn_size(), &mut self.rng)?.clone();
                let parent_b =
                    tournament_selection(pop, self.params.tourn_size(), &mut self.rng)?.clone();
                let (mut child_a, mut child_b) =
                    crossover(parent_a, parent_b, &self.params, &mut self.rng)?;

                for child in [&mut child_a, &mut child_b] {
                    debug_assert!(!child.has_perf_assessment());
                    mutate(child, &self.encoding, &self.params, &mut self.rng)?;
                }
                new_pop.push(child_a);
                new_pop.push(child_b);
            }
        }

        let new_pop = self.run_pop_learning(new_pop)?;
        self.gen_count += 1;
        info!(
            gen = self.gen_count,
            best_fitness = best_fitness(&new_pop)?,
            "generation complete"
        );
        self.pop = Some(new_pop);
        Ok(self.pop.as_deref().unwrap_or_default())
    }

    fn init_indiv(&mut self) -> Result<Indiv<E::Allele>> {
        let mut rules = Vec::with_capacity(self.params.indiv_size());
        for _ in 0..self.params.indiv_size() {
            let alleles = self.encoding.init_condition_alleles(&mut self.rng);
            let condition = Condition::new(alleles, &self.encoding)?;
            let action = match self.rng.choose(&self.selectable_actions) {
                Some(&action) => action,
                None => return Err(LcsError::Configuration("empty action space".to_string())),
            };
            rules.push(Rule::new(condition, action, &self.params, &mut self.rng));
        }
        Ok(Indiv::new(rules, self.selectable_actions.clone()))
    }

    /// Dispatches the learning-and-assessment stage across the population,
    /// one owned individual per task.
    fn run_pop_learning(
        &self,
        pop: Vec<Indiv<E::Allele>>,
    ) -> Result<Vec<Indiv<E::Allele>>> {
        pop.into_par_iter()
            .map(|indiv| self.run_indiv_learning(indiv))
            .collect()
    }

    /// Learning has two stages: first update the payoff estimates of the
    /// rules inside the individual via Monte-Carlo trajectories, then
    /// assess the individual's performance as a whole for the GA to rank.
    fn run_indiv_learning(&self, mut indiv: Indiv<E::Allele>) -> Result<Indiv<E::Allele>> {
        self.reinforce_rules_in_indiv(&mut indiv)?;
        self.assess_indiv_perf(&mut indiv)?;
        debug!(
            indiv_id = indiv.id(),
            fitness = indiv.fitness()?,
            "learning stage complete"
        );
        Ok(indiv)
    }

    fn reinforce_rules_in_indiv(&self, indiv: &mut Indiv<E::Allele>) -> Result<()> {
        // own a reseeded copy of the reinforcement environment: each
        // individual gets its own seeded trajectory sequence and no
        // environment state crosses individuals, so results do not depend
        // on how many workers run
        let mut reinf_env = self.reinf_env.clone();
        reinf_env.reseed_iod_rng(indiv.id());

        for _ in 0..self.params.num_reinf_rollouts() {
            let trajectory = gen_trajectory(&mut reinf_env, indiv, self.params.x_nought());
            reinforce_trajectory(
                indiv,
                &trajectory,
                self.params.gamma(),
                self.params.eta(),
                self.params.x_nought(),
            )?;
        }
        Ok(())
    }

    fn assess_indiv_perf(&self, indiv: &mut Indiv<E::Allele>) -> Result<()> {
        let mut perf_env = self.perf_env.clone();
        perf_env.reseed_iod_rng(indiv.id());
        let res = assess_perf(
            &mut perf_env,
            indiv,
            self.params.num_perf_rollouts(),
            self.params.gamma(),
            self.params.x_nought(),
        )?;
        indiv.set_perf_assessment_res(res);
        Ok(())
    }
}

fn best_fitness<T: ObsValue>(pop: &[Indiv<T>]) -> Result<f64> {
    let mut best = f64::NEG_INFINITY;
    for indiv in pop {
        best = best.max(indiv.fitness()?);
    }
    Ok(best)
}

/// Rolls out one episode, recording a trajectory step per decision.
///
/// Inference runs in full each step (no decision caching): the rule payoff
/// statistics mutate between trajectories. A no-action decision truncates
/// the trajectory.
fn gen_trajectory<Env>(
    env: &mut Env,
    indiv: &Indiv<Env::ObsValue>,
    x_nought: f64,
) -> Vec<TrajectoryStep<Env::ObsValue>>
where
    Env: Environment,
{
    let mut trajectory = Vec::new();
    let mut obs = env.reset();
    while !env.is_terminal() {
        match infer_action_and_action_set(indiv, &obs, x_nought) {
            Some((action, action_set)) => {
                let response = env.step(action);
                trajectory.push(TrajectoryStep {
                    obs,
                    action,
                    action_set,
                    reward: response.reward,
                });
                obs = response.obs;
            }
            None => break,
        }
    }
    trajectory
}

/// Propagates discounted returns backward over a trajectory, crediting each
/// step's action set: `payoff = gamma^(steps_from_end) * reward_sum`.
fn reinforce_trajectory<T: ObsValue>(
    indiv: &mut Indiv<T>,
    trajectory: &[TrajectoryStep<T>],
    gamma: f64,
    eta: f64,
    x_nought: f64,
) -> Result<()> {
    let mut reward_sum = 0.0;
    for (steps_from_end, step) in trajectory.iter().rev().enumerate() {
        reward_sum += step.reward;
        let payoff = gamma.powi(steps_from_end as i32) * reward_sum;
        update_action_set(
            indiv.rules_mut(),
            &step.action_set,
            payoff,
            &step.obs,
            eta,
            x_nought,
        )?;
    }
    Ok(())
}
