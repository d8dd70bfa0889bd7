//! Facade crate for the Tourloop round-trip planner.
//!
//! This crate re-exports the core domain types and exposes the exact
//! Held–Karp solver behind a feature flag.

#![forbid(unsafe_code)]

pub use tourloop_core::{
    CostMatrix, CostMetric, GeocodeError, Geocoder, InvalidInputError, PlanError, PlanResponse,
    PlannerConfig, RouteGeometryProvider, SolveError, Solver, Stop, Tour, TourPlanner,
    TravelTable, TravelTimeError, TravelTimeProvider, parse_addresses,
};

#[cfg(feature = "solver-exact")]
pub use tourloop_solver_exact::{
    DEFAULT_MAX_LOCATIONS, HeldKarpConfig, HeldKarpSolver, MAX_SUPPORTED_LOCATIONS, solve_rows,
};
