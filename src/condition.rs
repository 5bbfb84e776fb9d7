//! Rule conditions: a conjunction of per-dimension interval membership
//! tests derived from a genotype.

use std::fmt::{self, Display};

use crate::encoding::Encoding;
use crate::error::{LcsError, Result};
use crate::interval::{Interval, ObsValue};

const SPAN_FRAC_MIN_INCL: f64 = 0.0;
const SPAN_FRAC_MAX_INCL: f64 = 1.0;

/// One rule's match predicate: the raw alleles, the cached phenotype they
/// decode to, and the precomputed matching order.
///
/// Alleles are immutable once stored; condition mutation builds a new
/// `Condition`, which keeps the cached phenotype and matching order valid
/// for the value's whole lifetime.
#[derive(Debug, Clone)]
pub struct Condition<T> {
    alleles: Vec<T>,
    phenotype: Vec<Interval<T>>,
    matching_idx_order: Vec<usize>,
}

impl<T: ObsValue> Condition<T> {
    /// Decodes `alleles` through `encoding` and caches the phenotype along
    /// with the matching order.
    pub fn new<E>(alleles: Vec<T>, encoding: &E) -> Result<Self>
    where
        E: Encoding<Allele = T>,
    {
        let phenotype = encoding.decode(&alleles)?;
        let matching_idx_order = calc_matching_idx_order(&phenotype, encoding)?;
        Ok(Self {
            alleles,
            phenotype,
            matching_idx_order,
        })
    }

    pub fn alleles(&self) -> &[T] {
        &self.alleles
    }

    pub fn phenotype(&self) -> &[Interval<T>] {
        &self.phenotype
    }

    /// Number of phenotype intervals, equal to the observation
    /// dimensionality.
    pub fn len(&self) -> usize {
        self.phenotype.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phenotype.is_empty()
    }

    /// `true` iff every phenotype interval contains the corresponding
    /// observation component.
    ///
    /// Intervals are tested narrowest-first (the precomputed matching
    /// order), so non-matches are detected with the fewest comparisons on
    /// average. The result is identical to declaration-order evaluation.
    pub fn does_match(&self, obs: &[T]) -> bool {
        self.matching_idx_order.iter().all(|&idx| {
            self.phenotype[idx].contains_val(obs[idx])
        })
    }
}

/// Sorts dimension indices by ascending span fraction (interval span over
/// dimension span), narrowest first. A span fraction outside `[0, 1]`
/// indicates a malformed encoding configuration and aborts.
fn calc_matching_idx_order<E>(
    phenotype: &[Interval<E::Allele>],
    encoding: &E,
) -> Result<Vec<usize>>
where
    E: Encoding,
{
    let mut span_fracs_with_idxs = Vec::with_capacity(phenotype.len());
    for (idx, (interval, dim)) in phenotype.iter().zip(encoding.obs_space()).enumerate() {
        let span_frac = encoding.interval_span(interval) / encoding.dim_span(dim);
        if !(SPAN_FRAC_MIN_INCL..=SPAN_FRAC_MAX_INCL).contains(&span_frac) {
            return Err(LcsError::Encoding(format!(
                "span fraction {} of dimension {} outside [0, 1]",
                span_frac, idx
            )));
        }
        span_fracs_with_idxs.push((idx, span_frac));
    }
    // stable sort keeps declaration order among equal span fractions
    span_fracs_with_idxs.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(span_fracs_with_idxs.into_iter().map(|(idx, _)| idx).collect())
}

/// Equality is defined by allele equality: decoding is pure, so the
/// phenotype and matching order follow.
impl<T: PartialEq> PartialEq for Condition<T> {
    fn eq(&self, other: &Self) -> bool {
        self.alleles == other.alleles
    }
}

impl<T: ObsValue + Display> Display for Condition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for interval in &self.phenotype {
            if !first {
                write!(f, " && ")?;
            }
            write!(f, "{}", interval)?;
            first = false;
        }
        Ok(())
    }
}
