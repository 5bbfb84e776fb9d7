//! # LcsParams
//!
//! The `LcsParams` struct carries every hyperparameter the classifier system
//! consults: genetic-operator rates, population shape, learning-rule
//! constants, rollout counts, and the RNG seed.
//!
//! There is no process-global registry; the struct is built once, validated,
//! and passed by reference everywhere. Workers receive a read-only view, so
//! nothing has to be re-registered for parallel execution.
//!
//! ## Example
//!
//! ```rust
//! use pittlcs::params::LcsParams;
//!
//! let params = LcsParams::builder()
//!     .pop_size(20)
//!     .indiv_size(10)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.pop_size(), 20);
//! ```

use crate::error::{LcsError, Result};

const MIN_TOURN_SIZE: usize = 2;

/// Hyperparameters of the classifier system.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LcsParams {
    p_mut: f64,
    p_cross: f64,
    p_cross_swap: f64,
    tourn_size: usize,
    pop_size: usize,
    indiv_size: usize,
    eta: f64,
    gamma: f64,
    x_nought: f64,
    weight_i_min: f64,
    weight_i_max: f64,
    num_reinf_rollouts: usize,
    num_perf_rollouts: usize,
    seed: u64,
}

impl LcsParams {
    /// Returns a builder initialised with the default parameter values.
    pub fn builder() -> LcsParamsBuilder {
        LcsParamsBuilder::new()
    }

    /// Per-allele (and per-rule action) mutation probability.
    pub fn p_mut(&self) -> f64 {
        self.p_mut
    }

    /// Probability that a breeding round performs crossover at all.
    pub fn p_cross(&self) -> f64 {
        self.p_cross
    }

    /// Per-slot swap probability within a crossover.
    pub fn p_cross_swap(&self) -> f64 {
        self.p_cross_swap
    }

    pub fn tourn_size(&self) -> usize {
        self.tourn_size
    }

    pub fn pop_size(&self) -> usize {
        self.pop_size
    }

    /// Number of rules per individual.
    pub fn indiv_size(&self) -> usize {
        self.indiv_size
    }

    /// Learning rate of the payoff update.
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Discount factor for trajectory returns.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Constant bias component prepended to observations for linear
    /// prediction.
    pub fn x_nought(&self) -> f64 {
        self.x_nought
    }

    pub fn weight_i_min(&self) -> f64 {
        self.weight_i_min
    }

    pub fn weight_i_max(&self) -> f64 {
        self.weight_i_max
    }

    pub fn num_reinf_rollouts(&self) -> usize {
        self.num_reinf_rollouts
    }

    pub fn num_perf_rollouts(&self) -> usize {
        self.num_perf_rollouts
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Checks every parameter against its declared bounds.
    ///
    /// Called by the builder and again by the training loop before any work
    /// is done, so configuration errors abort before genetic-operator or
    /// rollout effort is wasted.
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("p_mut", self.p_mut),
            ("p_cross", self.p_cross),
            ("p_cross_swap", self.p_cross_swap),
        ] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(LcsError::Configuration(format!(
                    "{} must lie in [0, 1], got {}",
                    name, p
                )));
            }
        }

        if self.tourn_size < MIN_TOURN_SIZE {
            return Err(LcsError::Configuration(format!(
                "tourn_size must be at least {}, got {}",
                MIN_TOURN_SIZE, self.tourn_size
            )));
        }

        if self.pop_size < 2 || self.pop_size % 2 != 0 {
            return Err(LcsError::Configuration(format!(
                "pop_size must be even and at least 2, got {}",
                self.pop_size
            )));
        }

        if self.indiv_size == 0 {
            return Err(LcsError::Configuration(
                "indiv_size must be at least 1".to_string(),
            ));
        }

        if !self.eta.is_finite() || !(self.eta > 0.0 && self.eta <= 1.0) {
            return Err(LcsError::Configuration(format!(
                "eta must lie in (0, 1], got {}",
                self.eta
            )));
        }

        if !self.gamma.is_finite() || !(0.0..=1.0).contains(&self.gamma) {
            return Err(LcsError::Configuration(format!(
                "gamma must lie in [0, 1], got {}",
                self.gamma
            )));
        }

        if !self.x_nought.is_finite() {
            return Err(LcsError::Configuration(format!(
                "x_nought must be finite, got {}",
                self.x_nought
            )));
        }

        if !self.weight_i_min.is_finite()
            || !self.weight_i_max.is_finite()
            || self.weight_i_min > self.weight_i_max
        {
            return Err(LcsError::Configuration(format!(
                "weight init bounds must be finite with weight_i_min <= weight_i_max, got [{}, {}]",
                self.weight_i_min, self.weight_i_max
            )));
        }

        if self.num_perf_rollouts == 0 {
            return Err(LcsError::Configuration(
                "num_perf_rollouts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for LcsParams {
    fn default() -> Self {
        Self {
            p_mut: 0.05,
            p_cross: 0.7,
            p_cross_swap: 0.5,
            tourn_size: 3,
            pop_size: 40,
            indiv_size: 20,
            eta: 0.1,
            gamma: 0.95,
            x_nought: 10.0,
            weight_i_min: -0.05,
            weight_i_max: 0.05,
            num_reinf_rollouts: 10,
            num_perf_rollouts: 30,
            seed: 0,
        }
    }
}

/// Builder for [`LcsParams`].
#[derive(Debug, Clone, Default)]
pub struct LcsParamsBuilder {
    params: LcsParams,
}

impl LcsParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: LcsParams::default(),
        }
    }

    pub fn p_mut(mut self, p_mut: f64) -> Self {
        self.params.p_mut = p_mut;
        self
    }

    pub fn p_cross(mut self, p_cross: f64) -> Self {
        self.params.p_cross = p_cross;
        self
    }

    pub fn p_cross_swap(mut self, p_cross_swap: f64) -> Self {
        self.params.p_cross_swap = p_cross_swap;
        self
    }

    pub fn tourn_size(mut self, tourn_size: usize) -> Self {
        self.params.tourn_size = tourn_size;
        self
    }

    pub fn pop_size(mut self, pop_size: usize) -> Self {
        self.params.pop_size = pop_size;
        self
    }

    pub fn indiv_size(mut self, indiv_size: usize) -> Self {
        self.params.indiv_size = indiv_size;
        self
    }

    pub fn eta(mut self, eta: f64) -> Self {
        self.params.eta = eta;
        self
    }

    pub fn gamma(mut self, gamma: f64) -> Self {
        self.params.gamma = gamma;
        self
    }

    pub fn x_nought(mut self, x_nought: f64) -> Self {
        self.params.x_nought = x_nought;
        self
    }

    pub fn weight_init_bounds(mut self, min: f64, max: f64) -> Self {
        self.params.weight_i_min = min;
        self.params.weight_i_max = max;
        self
    }

    pub fn num_reinf_rollouts(mut self, num_reinf_rollouts: usize) -> Self {
        self.params.num_reinf_rollouts = num_reinf_rollouts;
        self
    }

    pub fn num_perf_rollouts(mut self, num_perf_rollouts: usize) -> Self {
        self.params.num_perf_rollouts = num_perf_rollouts;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    /// Validates the accumulated parameters and returns them.
    pub fn build(self) -> Result<LcsParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}
