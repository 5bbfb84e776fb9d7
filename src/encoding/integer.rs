//! Unordered-bound encoding over integer observation spaces.

use crate::error::{LcsError, Result};
use crate::interval::{Dimension, Interval};
use crate::rng::RandomNumberGenerator;

use super::{Encoding, GENERALITY_UB_INCL};

const DEFAULT_MUT_GEOM_CDF_TARGET: f64 = 0.99;

/// Integer-valued unordered-bound encoding.
///
/// Mutation noise is a shifted geometric draw (support >= 1) whose success
/// probability is solved per dimension so that `mut_geom_cdf_target` of the
/// probability mass falls within half the dimension's span. Narrow
/// dimensions therefore mutate in small steps and wide dimensions can jump
/// further, keeping step size meaningful across dimensions of differing
/// magnitude.
#[derive(Debug, Clone)]
pub struct IntegerUnorderedBoundEncoding {
    obs_space: Vec<Dimension<i32>>,
    mut_geom_cdf_target: f64,
}

impl IntegerUnorderedBoundEncoding {
    pub fn new(obs_space: Vec<Dimension<i32>>) -> Result<Self> {
        if obs_space.is_empty() {
            return Err(LcsError::Configuration(
                "observation space must have at least one dimension".to_string(),
            ));
        }
        Ok(Self {
            obs_space,
            mut_geom_cdf_target: DEFAULT_MUT_GEOM_CDF_TARGET,
        })
    }

    /// Overrides the CDF mass that mutation noise must reach within half a
    /// dimension's span.
    pub fn with_geom_cdf_target(mut self, target: f64) -> Result<Self> {
        if !target.is_finite() || !(target > 0.0 && target < 1.0) {
            return Err(LcsError::Configuration(format!(
                "geometric CDF target must lie in (0, 1), got {}",
                target
            )));
        }
        self.mut_geom_cdf_target = target;
        Ok(self)
    }

    /// Success probability of the mutation-noise geometric for `dim`:
    /// solves `1 - (1 - p)^half_span >= target` at equality.
    fn geom_success_prob(&self, dim: &Dimension<i32>) -> f64 {
        let half_span = (f64::from(dim.upper() - dim.lower()) / 2.0).max(1.0);
        1.0 - (1.0 - self.mut_geom_cdf_target).powf(1.0 / half_span)
    }
}

impl Encoding for IntegerUnorderedBoundEncoding {
    type Allele = i32;

    fn obs_space(&self) -> &[Dimension<i32>] {
        &self.obs_space
    }

    fn init_random_allele(
        &self,
        dim: &Dimension<i32>,
        rng: &mut RandomNumberGenerator,
    ) -> i32 {
        rng.uniform_int(dim.lower(), dim.upper())
    }

    fn mutate_allele(
        &self,
        allele: i32,
        dim: &Dimension<i32>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<i32> {
        // shifted geometric: supported on integers >= 1
        let noise = 1 + rng.geometric(self.geom_success_prob(dim))? as i64;
        let signed = if rng.sign() > 0.0 { noise } else { -noise };
        let mutated = i64::from(allele) + signed;
        Ok(mutated.clamp(i64::from(dim.lower()), i64::from(dim.upper())) as i32)
    }

    fn interval_span(&self, interval: &Interval<i32>) -> f64 {
        // counts inclusive values, so even a point interval has span 1
        f64::from(interval.upper() - interval.lower() + 1)
    }

    fn dim_span(&self, dim: &Dimension<i32>) -> f64 {
        f64::from(dim.upper() - dim.lower() + 1)
    }

    fn generality_in_bounds(&self, generality: f64) -> bool {
        generality > 0.0 && generality <= GENERALITY_UB_INCL
    }
}
