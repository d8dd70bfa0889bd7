//! Core domain types for the Tourloop planner.
//!
//! Stops, cost matrices and tours are validated at construction so the
//! solver and planner can assume well-formed input. Network-backed
//! collaborators live in `tourloop-data`; this crate only defines the traits
//! they implement.

mod matrix;
mod planner;
mod solver;
mod stop;
mod tour;

pub mod geocode;
pub mod navigation;
pub mod test_support;
pub mod travel_time;

pub use geocode::{FailedAddress, GeocodeError, GeocodeOutcome, Geocoder, geocode_all};
pub use matrix::CostMatrix;
pub use planner::{
    DEFAULT_MAX_STOPS, HOME_INDEX, PlanError, PlanResponse, PlannerConfig, TourPlanner,
};
pub use solver::{InvalidInputError, SolveError, Solver};
pub use stop::{Stop, parse_addresses};
pub use tour::Tour;
pub use travel_time::{
    CostMetric, RouteGeometryProvider, StraightLineProvider, TravelTable, TravelTimeError,
    TravelTimeProvider,
};
