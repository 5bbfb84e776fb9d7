//! # Error Types
//!
//! This module defines custom error types for the classifier system.
//! It provides specific error variants for the failure scenarios that may
//! occur while encoding conditions, running inference, updating payoff
//! estimates, or driving the evolutionary loop.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use pittlcs::error::{LcsError, Result};
//!
//! fn some_function() -> Result<()> {
//!     // Function implementation
//!     Ok(())
//! }
//!
//! fn caller() {
//!     match some_function() {
//!         Ok(_) => println!("Success!"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur in the classifier system.
#[derive(Error, Debug)]
pub enum LcsError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a property is read before it has been set.
    ///
    /// Reading an individual's fitness before its performance assessment has
    /// run falls in this category: ranking on an unset fitness would be
    /// meaningless, so the read aborts instead of returning a default.
    #[error("Unset property error: {0} has not been set yet")]
    UnsetProperty(&'static str),

    /// Error that occurs when an arithmetic fault is detected during a
    /// learning update (zero normalisation term, non-finite weight or
    /// variance values).
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// Error that occurs when condition alleles cannot be decoded into a
    /// phenotype, or a phenotype disagrees with the observation space.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error that occurs when a condition generality falls outside its
    /// declared bounds. This indicates a malformed encoding configuration.
    #[error("Invariant violation: condition generality {0} outside declared bounds")]
    GeneralityOutOfBounds(f64),

    /// Error that occurs when a random distribution cannot be constructed.
    #[error("Random generation error: {0}")]
    RandomGeneration(String),
}

/// A specialized Result type for classifier system operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the
/// error type fixed to `LcsError`.
pub type Result<T> = std::result::Result<T, LcsError>;
