//! Unordered-bound encoding over real observation spaces.

use crate::error::{LcsError, Result};
use crate::interval::{Dimension, Interval};
use crate::rng::RandomNumberGenerator;

use super::{Encoding, GENERALITY_UB_INCL};

/// Real-valued unordered-bound encoding.
///
/// Mutation noise is zero-mean Gaussian with standard deviation
/// `m_nought * dim_span`; its magnitude is taken and the shared algorithm's
/// uniform random sign decides the direction.
#[derive(Debug, Clone)]
pub struct RealUnorderedBoundEncoding {
    obs_space: Vec<Dimension<f64>>,
    m_nought: f64,
}

impl RealUnorderedBoundEncoding {
    /// `m_nought` is the fraction of a dimension's span used as the noise
    /// standard deviation; it must lie in `(0, 1]`.
    pub fn new(obs_space: Vec<Dimension<f64>>, m_nought: f64) -> Result<Self> {
        if obs_space.is_empty() {
            return Err(LcsError::Configuration(
                "observation space must have at least one dimension".to_string(),
            ));
        }
        if !m_nought.is_finite() || !(m_nought > 0.0 && m_nought <= 1.0) {
            return Err(LcsError::Configuration(format!(
                "m_nought must lie in (0, 1], got {}",
                m_nought
            )));
        }
        Ok(Self {
            obs_space,
            m_nought,
        })
    }

    pub fn m_nought(&self) -> f64 {
        self.m_nought
    }
}

impl Encoding for RealUnorderedBoundEncoding {
    type Allele = f64;

    fn obs_space(&self) -> &[Dimension<f64>] {
        &self.obs_space
    }

    fn init_random_allele(
        &self,
        dim: &Dimension<f64>,
        rng: &mut RandomNumberGenerator,
    ) -> f64 {
        rng.uniform(dim.lower(), dim.upper())
    }

    fn mutate_allele(
        &self,
        allele: f64,
        dim: &Dimension<f64>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<f64> {
        let std_dev = self.m_nought * self.dim_span(dim);
        let noise = rng.gaussian(std_dev)?.abs();
        let mutated = allele + rng.sign() * noise;
        Ok(mutated.clamp(dim.lower(), dim.upper()))
    }

    fn interval_span(&self, interval: &Interval<f64>) -> f64 {
        interval.upper() - interval.lower()
    }

    fn dim_span(&self, dim: &Dimension<f64>) -> f64 {
        dim.upper() - dim.lower()
    }

    fn generality_in_bounds(&self, generality: f64) -> bool {
        (0.0..=GENERALITY_UB_INCL).contains(&generality)
    }
}
