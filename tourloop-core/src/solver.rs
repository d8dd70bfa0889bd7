//! Solver boundary: the exact tour optimizer and its error taxonomy.

use thiserror::Error;

use crate::{CostMatrix, Tour};

/// Malformed solver input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// The matrix has no rows.
    #[error("cost matrix must contain at least one location")]
    Empty,
    /// A row's length differs from the number of rows.
    #[error("cost matrix is not square: row {row} has {found} entries, expected {expected}")]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Number of rows in the matrix.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// An entry is NaN or infinite, e.g. an unreachable pair.
    #[error("cost from {from} to {to} is not finite")]
    NonFiniteCost {
        /// Origin index.
        from: usize,
        /// Destination index.
        to: usize,
    },
    /// An entry is below zero.
    #[error("cost from {from} to {to} is negative ({value})")]
    NegativeCost {
        /// Origin index.
        from: usize,
        /// Destination index.
        to: usize,
        /// Offending value.
        value: f64,
    },
    /// A self-distance is not zero.
    #[error("self-cost of location {index} must be zero, found {value}")]
    NonZeroDiagonal {
        /// Location index.
        index: usize,
        /// Offending value.
        value: f64,
    },
    /// The start index does not name a location.
    #[error("start index {start} is out of range for {locations} locations")]
    StartOutOfRange {
        /// Requested start index.
        start: usize,
        /// Number of locations in the matrix.
        locations: usize,
    },
}

/// Errors returned by [`Solver::solve`].
///
/// Every variant is detected before any optimization work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The matrix or start index is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
    /// Too many locations for exact optimization.
    #[error("too many stops for exact optimization: {locations} locations exceed the limit of {limit}")]
    SizeLimit {
        /// Number of locations requested.
        locations: usize,
        /// Configured ceiling.
        limit: usize,
    },
}

/// Find the minimum-cost closed tour over a cost matrix.
///
/// Implementations are pure functions of their inputs: repeated calls with
/// the same matrix and start return the same [`Tour`].
/// Solvers must be `Send + Sync` to operate safely across threads.
pub trait Solver: Send + Sync {
    /// Solve for the optimal tour anchored at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidInput`] for a bad `start` and
    /// [`SolveError::SizeLimit`] when the matrix is too large.
    fn solve(&self, matrix: &CostMatrix, start: usize) -> Result<Tour, SolveError>;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve(&self, matrix: &CostMatrix, start: usize) -> Result<Tour, SolveError> {
        (**self).solve(matrix, start)
    }
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn solve(&self, matrix: &CostMatrix, start: usize) -> Result<Tour, SolveError> {
        (**self).solve(matrix, start)
    }
}
