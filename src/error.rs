//! Error types for keyed-collections.
//!
//! Ordinary misuse (absent keys, empty containers) is reported through
//! `bool`/`Option` returns and never reaches these types.

use std::collections::TryReserveError;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by fallible container operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The allocator refused to provide storage for growth.
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    /// The requested capacity does not fit in `usize`.
    #[error("capacity overflow")]
    CapacityOverflow,

    #[error("invalid max load factor {0}: must be in [0.1, 1]")]
    InvalidLoadFactor(f32),

    #[error("initial capacity must be at least 1")]
    ZeroCapacity,
}

/// A broken red-black tree invariant, as reported by `RbTree::verify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("root node is red")]
    RedRoot,

    #[error("red node has a red child")]
    RedRedEdge,

    #[error("black height differs between paths: {left} vs {right}")]
    BlackHeightMismatch { left: usize, right: usize },

    #[error("in-order keys are not strictly ascending")]
    OutOfOrder,

    #[error("child/parent links disagree")]
    BrokenParentLink,

    #[error("reachable node count {reachable} differs from length {len}")]
    LengthMismatch { reachable: usize, len: usize },
}
