//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` and
//! provides the draws the classifier system needs: uniform reals and
//! integers, Bernoulli trials, Gaussian and geometric noise, and random
//! choice from a slice.
//!
//! The generator is owned explicitly and threaded through every call that
//! needs randomness; there is no process-global RNG. Seeding it once from
//! the `seed` hyperparameter makes a whole run reproducible.
//!
//! ## Example
//!
//! ```rust
//! use pittlcs::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let x = rng.uniform(0.0, 1.0);
//! assert!((0.0..=1.0).contains(&x));
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Geometric, Normal};

use crate::error::{LcsError, Result};

/// A wrapper around the `rand` crate's `StdRng` that provides the draw
/// primitives used throughout the classifier system.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` with a specific seed.
    ///
    /// This is what the training loop uses so that runs are reproducible.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a uniform random float from `[low, high]`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..=high)
    }

    /// Draws a uniform random integer from `[low, high]` (both inclusive).
    pub fn uniform_int(&mut self, low: i32, high: i32) -> i32 {
        self.rng.gen_range(low..=high)
    }

    /// Draws a uniform random index for a collection of length `len`.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Returns `true` with probability `p`.
    ///
    /// `p` must lie in `[0, 1]`; hyperparameter validation guarantees this
    /// for every probability the system draws against.
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }

    /// Returns `-1.0` or `1.0` with equal probability.
    pub fn sign(&mut self) -> f64 {
        if self.rng.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }

    /// Draws from a zero-mean Gaussian with the given standard deviation.
    pub fn gaussian(&mut self, std_dev: f64) -> Result<f64> {
        let normal = Normal::new(0.0, std_dev).map_err(|e| {
            LcsError::RandomGeneration(format!(
                "invalid Gaussian standard deviation {}: {}",
                std_dev, e
            ))
        })?;
        Ok(normal.sample(&mut self.rng))
    }

    /// Draws the number of failures before the first success of a Bernoulli
    /// trial with success probability `p` (a geometric draw supported on
    /// integers >= 0).
    pub fn geometric(&mut self, p: f64) -> Result<u64> {
        let geometric = Geometric::new(p).map_err(|e| {
            LcsError::RandomGeneration(format!(
                "invalid geometric success probability {}: {}",
                p, e
            ))
        })?;
        Ok(geometric.sample(&mut self.rng))
    }

    /// Picks a uniformly random element of `slice`, or `None` if it is empty.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            Some(&slice[self.index(slice.len())])
        }
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
