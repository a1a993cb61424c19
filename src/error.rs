//! Error types for the solver.
//!
//! Malformed input is rejected before any stochastic work starts. Broken
//! internal invariants surface as [`TspError::InvariantViolation`] and abort
//! the whole solve.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

/// Unified error type for instance construction and solving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// The instance has no nodes.
    #[error("instance has no nodes")]
    EmptyInstance,

    /// A sequence or matrix does not have the expected length.
    #[error("size mismatch: expected {expected}, found {found}")]
    SizeMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// A tour is not a permutation of `0..N`.
    #[error("not a permutation: node {node} is out of range or repeated")]
    NotAPermutation {
        /// First offending node.
        node: usize,
    },

    /// A node coordinate is NaN or infinite.
    #[error("coordinates of node {node} are not finite")]
    NonFiniteCoordinate {
        /// Offending node.
        node: usize,
    },

    /// A distance is NaN or infinite.
    #[error("distance from {from} to {to} is not finite")]
    NonFiniteDistance {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
    },

    /// An operator needs more nodes than it was given.
    #[error("operator requires at least {required} nodes, found {found}")]
    TooFewNodes {
        /// Minimum number of nodes.
        required: usize,
        /// Actual number of nodes.
        found: usize,
    },

    /// Invalid evolver configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An internal invariant was broken.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl TspError {
    /// Returns `true` for errors caused by caller input rather than the engine.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, TspError::InvariantViolation(_))
    }
}
