//! # Encoding
//!
//! The `Encoding` trait maps flat allele sequences to condition phenotypes
//! (ordered sequences of intervals) and back, generates initial alleles,
//! mutates alleles, and computes a condition generality metric.
//!
//! Both concrete encodings share the "unordered-bound" algorithm: every
//! observation dimension is covered by two alleles whose genotype order
//! carries no meaning, because decoding always sorts each pair into
//! `(lower, upper)`. The shared algorithm lives in the trait's provided
//! methods; the integer and real variants supply only the type-specific
//! pieces (allele priors, mutation noise, span arithmetic).

pub mod integer;
pub mod real;

use crate::error::{LcsError, Result};
use crate::interval::{Dimension, Interval, ObsValue};
use crate::rng::RandomNumberGenerator;

pub use integer::IntegerUnorderedBoundEncoding;
pub use real::RealUnorderedBoundEncoding;

pub(crate) const GENERALITY_UB_INCL: f64 = 1.0;

/// Genotype/phenotype mapping for rule conditions.
///
/// The provided methods implement the unordered-bound algorithm; the
/// required methods are the per-type variation points.
pub trait Encoding: Clone + std::fmt::Debug + Send + Sync {
    /// Scalar type of alleles and observation components.
    type Allele: ObsValue;

    /// The observation space the encoding covers, one entry per dimension.
    fn obs_space(&self) -> &[Dimension<Self::Allele>];

    /// Draws one initial allele for a dimension per the encoding's prior.
    fn init_random_allele(
        &self,
        dim: &Dimension<Self::Allele>,
        rng: &mut RandomNumberGenerator,
    ) -> Self::Allele;

    /// Returns a mutated copy of `allele`: dimension-relative noise with a
    /// uniformly random sign, clamped to the dimension's bounds.
    fn mutate_allele(
        &self,
        allele: Self::Allele,
        dim: &Dimension<Self::Allele>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self::Allele>;

    /// Span of a phenotype interval. Integer spans count inclusive values
    /// (`upper - lower + 1`); real spans are `upper - lower`.
    fn interval_span(&self, interval: &Interval<Self::Allele>) -> f64;

    /// Span of an observation-space dimension, same convention as
    /// [`Encoding::interval_span`].
    fn dim_span(&self, dim: &Dimension<Self::Allele>) -> f64;

    /// Whether a generality value lies inside the variant's declared bounds
    /// (integer: `(0, 1]`; real: `[0, 1]`).
    fn generality_in_bounds(&self, generality: f64) -> bool;

    /// Dimensionality of the observation space.
    fn obs_dim(&self) -> usize {
        self.obs_space().len()
    }

    /// Generates a fresh allele sequence: two alleles per dimension, drawn
    /// from the per-dimension prior.
    fn init_condition_alleles(&self, rng: &mut RandomNumberGenerator) -> Vec<Self::Allele> {
        let mut alleles = Vec::with_capacity(self.obs_dim() * 2);
        for dim in self.obs_space() {
            for _ in 0..2 {
                alleles.push(self.init_random_allele(dim, rng));
            }
        }
        alleles
    }

    /// Decodes alleles into a phenotype, pairing them per dimension and
    /// ordering each pair into `(lower, upper)`.
    ///
    /// Pure: re-decoding the same alleles always yields the same phenotype.
    fn decode(&self, alleles: &[Self::Allele]) -> Result<Vec<Interval<Self::Allele>>> {
        if alleles.len() % 2 != 0 {
            return Err(LcsError::Encoding(format!(
                "allele count {} is not even",
                alleles.len()
            )));
        }
        if alleles.len() / 2 != self.obs_dim() {
            return Err(LcsError::Encoding(format!(
                "allele count {} does not cover the {}-dimensional observation space",
                alleles.len(),
                self.obs_dim()
            )));
        }
        Ok(alleles
            .chunks_exact(2)
            .map(|pair| Interval::new(pair[0], pair[1]))
            .collect())
    }

    /// Returns a mutated copy of `alleles`: each allele independently
    /// mutates with probability `p_mut`.
    fn mutate_condition_alleles(
        &self,
        alleles: &[Self::Allele],
        p_mut: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Self::Allele>> {
        if alleles.len() != self.obs_dim() * 2 {
            return Err(LcsError::Encoding(format!(
                "allele count {} does not cover the {}-dimensional observation space",
                alleles.len(),
                self.obs_dim()
            )));
        }
        let mut mutated = Vec::with_capacity(alleles.len());
        for (pair, dim) in alleles.chunks_exact(2).zip(self.obs_space()) {
            for &allele in pair {
                if rng.gen_bool(p_mut) {
                    mutated.push(self.mutate_allele(allele, dim, rng)?);
                } else {
                    mutated.push(allele);
                }
            }
        }
        Ok(mutated)
    }

    /// Ratio of summed interval spans to summed dimension spans.
    ///
    /// A specificity/generality diagnostic; a value outside the variant's
    /// declared bounds is an invariant violation and aborts.
    fn calc_condition_generality(
        &self,
        cond_intervals: &[Interval<Self::Allele>],
    ) -> Result<f64> {
        let numer: f64 = cond_intervals
            .iter()
            .map(|interval| self.interval_span(interval))
            .sum();
        let denom: f64 = self.obs_space().iter().map(|dim| self.dim_span(dim)).sum();
        let generality = numer / denom;
        if !self.generality_in_bounds(generality) {
            return Err(LcsError::GeneralityOutOfBounds(generality));
        }
        Ok(generality)
    }
}
