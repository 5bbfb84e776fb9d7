pub mod caching;
pub mod condition;
pub mod encoding;
pub mod env;
pub mod error;
pub mod ga;
pub mod indiv;
pub mod inference;
pub mod interval;
pub mod lcs;
pub mod learning;
pub mod params;
pub mod rng;
pub mod rule;

// Re-export commonly used types for convenience
pub use caching::DecisionCache;
pub use condition::Condition;
pub use encoding::{Encoding, IntegerUnorderedBoundEncoding, RealUnorderedBoundEncoding};
pub use env::{assess_perf, EnvResponse, Environment, PerfAssessment};
pub use error::{LcsError, Result};
pub use indiv::Indiv;
pub use interval::{Dimension, Interval, ObsValue};
pub use lcs::Lcs;
pub use params::LcsParams;
pub use rule::{Action, Rule};
