//! End-to-end round-trip planning.
//!
//! [`TourPlanner`] strings the collaborators together: geocode the addresses,
//! fetch a travel table, solve for the optimal loop from home and summarise
//! it. The planner is generic over its boundaries so tests can run offline.

use geo::Coord;
use thiserror::Error;

use crate::geocode::{FailedAddress, Geocoder, geocode_all};
use crate::navigation::{NavigationError, google_maps_directions_url};
use crate::tour::leg_sum;
use crate::{
    CostMatrix, CostMetric, RouteGeometryProvider, SolveError, Solver, StraightLineProvider, Stop,
    Tour, TravelTable, TravelTimeError, TravelTimeProvider,
};

/// Default ceiling on addresses, home included.
pub const DEFAULT_MAX_STOPS: usize = 15;

/// Index of home in the address list.
pub const HOME_INDEX: usize = 0;

/// Configuration for [`TourPlanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Maximum number of addresses, home included.
    pub max_stops: usize,
    /// Fall back to straight-line distances when the travel-time provider fails.
    pub allow_fallback: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_stops: DEFAULT_MAX_STOPS,
            allow_fallback: true,
        }
    }
}

/// Errors returned by [`TourPlanner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Home plus at least one stop is required.
    #[error("fewer than 2 usable locations: found {found}")]
    TooFewLocations {
        /// Number of addresses supplied.
        found: usize,
    },
    /// More addresses than the configured ceiling.
    #[error("too many stops for exact optimization: {found} addresses exceed the limit of {limit}")]
    TooManyLocations {
        /// Number of addresses supplied.
        found: usize,
        /// Configured ceiling.
        limit: usize,
    },
    /// One or more addresses could not be resolved.
    #[error("could not resolve {} address(es): {}", .failed.len(), failed_list(.failed))]
    Geocoding {
        /// Every address that failed, in input order.
        failed: Vec<FailedAddress>,
    },
    /// The travel-time provider failed and no fallback was allowed.
    #[error("failed to fetch travel times: {0}")]
    TravelTime(#[from] TravelTimeError),
    /// The travel table did not form a valid tour problem.
    #[error(transparent)]
    Solve(#[from] SolveError),
    /// The navigation link could not be built.
    #[error("failed to build navigation link: {0}")]
    Navigation(#[from] NavigationError),
}

fn failed_list(failed: &[FailedAddress]) -> String {
    failed
        .iter()
        .map(|entry| entry.address.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A planned round trip, ready for display or export.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanResponse {
    /// Geocoded stops in input order; index 0 is home.
    pub stops: Vec<Stop>,
    /// Optimal visiting order and its cost in `metric` units.
    pub tour: Tour,
    /// Quantity the tour minimises.
    pub metric: CostMetric,
    /// Total travel time in seconds along the closed tour, when known.
    pub total_duration_secs: Option<f64>,
    /// Total distance in metres along the closed tour.
    pub total_distance_m: f64,
    /// Whether straight-line distances replaced road travel times.
    pub used_fallback: bool,
    /// Directions link visiting the stops in order and returning home.
    pub navigation_url: String,
    /// Road polyline following the tour, when fetched.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub geometry: Option<Vec<Coord<f64>>>,
}

impl PlanResponse {
    /// Stops in visiting order, home first and last.
    #[must_use]
    pub fn ordered_stops(&self) -> Vec<&Stop> {
        self.tour
            .closed_order()
            .into_iter()
            .filter_map(|index| self.stops.get(index))
            .collect()
    }

    /// Fetch the road polyline for the tour and store it in `geometry`.
    ///
    /// Failures are logged and leave `geometry` unset; a plan without a map
    /// line is still a usable plan.
    pub fn attach_geometry<R>(&mut self, provider: &R)
    where
        R: RouteGeometryProvider + ?Sized,
    {
        match provider.route_geometry(&self.stops, &self.tour.closed_order()) {
            Ok(path) => self.geometry = Some(path),
            Err(error) => log::warn!("could not fetch route geometry: {error}"),
        }
    }
}

/// Plans the fastest loop from home through every address.
pub struct TourPlanner<G, T, S>
where
    G: Geocoder,
    T: TravelTimeProvider,
    S: Solver,
{
    geocoder: G,
    travel_time_provider: T,
    solver: S,
    config: PlannerConfig,
}

impl<G, T, S> TourPlanner<G, T, S>
where
    G: Geocoder,
    T: TravelTimeProvider,
    S: Solver,
{
    /// Construct a planner using default configuration.
    pub fn new(geocoder: G, travel_time_provider: T, solver: S) -> Self {
        Self::with_config(geocoder, travel_time_provider, solver, PlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(
        geocoder: G,
        travel_time_provider: T,
        solver: S,
        config: PlannerConfig,
    ) -> Self {
        Self {
            geocoder,
            travel_time_provider,
            solver,
            config,
        }
    }

    /// The active configuration.
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan the optimal round trip through `addresses`, the first being home.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] when the address count is out of bounds, an
    /// address fails to geocode, travel times are unavailable without a
    /// fallback, or the solver rejects the table.
    pub fn plan<A: AsRef<str>>(&self, addresses: &[A]) -> Result<PlanResponse, PlanError> {
        self.check_count(addresses.len())?;

        let outcome = geocode_all(&self.geocoder, addresses);
        if !outcome.is_complete() {
            return Err(PlanError::Geocoding {
                failed: outcome.failed,
            });
        }
        self.plan_stops(outcome.stops)
    }

    /// Plan the optimal round trip through already-resolved stops.
    ///
    /// # Errors
    ///
    /// As [`TourPlanner::plan`], minus geocoding failures.
    pub fn plan_stops(&self, stops: Vec<Stop>) -> Result<PlanResponse, PlanError> {
        self.check_count(stops.len())?;

        let (table, used_fallback) = self.fetch_table(&stops)?;
        let matrix = CostMatrix::from_row_slices(table.cost_rows()).map_err(SolveError::from)?;
        let tour = self.solver.solve(&matrix, HOME_INDEX)?;
        log::info!(
            "planned loop through {} stops: {:?} ({:?} cost {:.1})",
            stops.len(),
            tour.order,
            table.metric(),
            tour.total_cost
        );

        let closed = tour.closed_order();
        let total_duration_secs = table
            .durations
            .as_deref()
            .map(|rows| sum_along(rows, &closed));
        let total_distance_m = sum_along(&table.distances, &closed);
        let navigation_url = google_maps_directions_url(&stops, &closed)?;

        Ok(PlanResponse {
            stops,
            tour,
            metric: table.metric(),
            total_duration_secs,
            total_distance_m,
            used_fallback,
            navigation_url,
            geometry: None,
        })
    }

    fn check_count(&self, found: usize) -> Result<(), PlanError> {
        if found < 2 {
            return Err(PlanError::TooFewLocations { found });
        }
        if found > self.config.max_stops {
            return Err(PlanError::TooManyLocations {
                found,
                limit: self.config.max_stops,
            });
        }
        Ok(())
    }

    fn fetch_table(&self, stops: &[Stop]) -> Result<(TravelTable, bool), PlanError> {
        match self.travel_time_provider.get_travel_time_matrix(stops) {
            Ok(table) => Ok((table, false)),
            Err(error) if self.config.allow_fallback => {
                log::warn!("travel time provider failed ({error}); falling back to straight-line distances");
                let table = StraightLineProvider.get_travel_time_matrix(stops)?;
                Ok((table, true))
            }
            Err(error) => Err(PlanError::TravelTime(error)),
        }
    }
}

fn sum_along(rows: &[Vec<f64>], closed_order: &[usize]) -> f64 {
    leg_sum(closed_order, |from, to| {
        rows.get(from).and_then(|row| row.get(to)).copied()
    })
}
