//! Compute travel costs between stops.
//!
//! The `TravelTimeProvider` trait abstracts the retrieval of pairwise travel
//! durations and distances between [`Stop`](crate::Stop) values. Callers
//! supply a slice of stops and receive a [`TravelTable`].
//!
//! Errors are returned when inputs are invalid, e.g. an empty slice, or when
//! a remote routing service fails.

mod error;
mod provider;
mod straight_line;

pub use error::TravelTimeError;
pub use provider::{CostMetric, RouteGeometryProvider, TravelTable, TravelTimeProvider};
pub use straight_line::{EARTH_RADIUS_M, StraightLineProvider, haversine_m};
