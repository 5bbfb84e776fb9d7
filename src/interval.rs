//! Bounded numeric ranges: the leaf type of condition phenotypes and the
//! per-component bounds of observation spaces.

use std::fmt::{self, Debug, Display};

/// Scalar type of one observation component (and of the condition alleles
/// that bound it). Implemented for `i32` (integer observation spaces) and
/// `f64` (real observation spaces).
pub trait ObsValue:
    Copy + PartialEq + PartialOrd + Debug + Into<f64> + Send + Sync + 'static
{
}

impl<T> ObsValue for T where
    T: Copy + PartialEq + PartialOrd + Debug + Into<f64> + Send + Sync + 'static
{
}

/// A closed numeric range `[lower, upper]` with containment testing.
///
/// Construction orders the pair, so `lower <= upper` always holds; genotype
/// order carries no meaning (the unordered-bound representation).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T> {
    lower: T,
    upper: T,
}

impl<T: Copy + PartialOrd> Interval<T> {
    /// Creates an interval from two bounds in either order.
    pub fn new(first: T, second: T) -> Self {
        if second < first {
            Self {
                lower: second,
                upper: first,
            }
        } else {
            Self {
                lower: first,
                upper: second,
            }
        }
    }

    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
    }

    /// `true` iff `lower <= val <= upper`.
    pub fn contains_val(&self, val: T) -> bool {
        self.lower <= val && val <= self.upper
    }
}

impl<T: Display> Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// The bounds of one observation-space dimension.
///
/// Same shape as [`Interval`], kept as its own type so that genotype
/// phenotypes and observation-space descriptions do not mix.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension<T> {
    lower: T,
    upper: T,
}

impl<T: Copy + PartialOrd> Dimension<T> {
    /// Creates a dimension from two bounds in either order.
    pub fn new(first: T, second: T) -> Self {
        if second < first {
            Self {
                lower: second,
                upper: first,
            }
        } else {
            Self {
                lower: first,
                upper: second,
            }
        }
    }

    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_orders_unordered_bounds() {
        let interval = Interval::new(9, 3);
        assert_eq!(interval.lower(), 3);
        assert_eq!(interval.upper(), 9);
    }

    #[test]
    fn test_contains_val_is_inclusive() {
        let interval = Interval::new(1.0, 2.0);
        assert!(interval.contains_val(1.0));
        assert!(interval.contains_val(2.0));
        assert!(interval.contains_val(1.5));
        assert!(!interval.contains_val(0.999));
        assert!(!interval.contains_val(2.001));
    }

    #[test]
    fn test_degenerate_interval_contains_only_its_point() {
        let interval = Interval::new(4, 4);
        assert!(interval.contains_val(4));
        assert!(!interval.contains_val(3));
        assert!(!interval.contains_val(5));
    }
}
