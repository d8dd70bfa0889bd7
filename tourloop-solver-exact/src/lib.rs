//! Exact round-trip solver for Tourloop.
//!
//! This crate provides [`HeldKarpSolver`], the default implementation of the
//! [`Solver`](tourloop_core::Solver) trait. It finds the minimum-cost closed
//! tour from a fixed anchor with the Held–Karp dynamic programme, which is
//! exact but exponential in the number of locations. A configurable ceiling
//! keeps the DP table within a predictable memory bound.
//!
//! Ties between equal-cost predecessors resolve to the lowest location index,
//! so repeated calls always return the same order.

#![forbid(unsafe_code)]

mod held_karp;
mod solver;

pub use solver::{
    DEFAULT_MAX_LOCATIONS, HeldKarpConfig, HeldKarpSolver, MAX_SUPPORTED_LOCATIONS, solve_rows,
};
