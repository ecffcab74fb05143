//! Error taxonomy for the hull core (§7).
//!
//! Only the first of the spec's three error kinds ("fatal errors") is
//! represented as a Rust error type. Emptiness and unboundedness are
//! ordinary values, not errors: a `Polyhedron` can be empty, and
//! `LpOutcome::Unbounded` is a normal branch, not a failure (§7.2, §7.3).

use thiserror::Error;

/// Fatal error propagated out of the hull core.
///
/// Every call site that owns inputs is expected to drop them on `Err` the
/// way a value-semantics return naturally does; there is no null-sentinel
/// return here (§9, "Error unions replace sentinel null returns").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HullError {
    /// The LP oracle reported a solver failure (C1 contract: `error`).
    #[error("LP oracle failed: {0}")]
    LpSolverError(String),

    /// The low-level simplex tableau could not be built or pivoted.
    #[error("simplex tableau error: {0}")]
    TableauError(String),

    /// A dimension mismatch between operands that should share ambient
    /// dimension (e.g. two members of a union, or a constraint row and a
    /// polyhedron).
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A matrix operation required full rank (or a particular rank) and
    /// the input did not have it.
    #[error("matrix is not full rank: {0}")]
    RankDeficient(String),

    /// Internal invariant violated; indicates a bug in the core rather
    /// than a malformed input.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

pub type HullResult<T> = Result<T, HullError>;
