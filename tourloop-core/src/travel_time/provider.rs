//! Travel-time provider traits and the pairwise cost table they return.

use geo::Coord;

use crate::Stop;

use super::error::TravelTimeError;

/// Which quantity a cost matrix measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CostMetric {
    /// Road travel time in seconds.
    Duration,
    /// Distance in metres.
    Distance,
}

/// Pairwise travel costs between stops.
///
/// Both matrices are row-major `n×n`; `durations[i][j]` is the time in seconds
/// from stop `i` to stop `j`, `distances[i][j]` the distance in metres.
/// Unreachable pairs hold `f64::INFINITY`.
///
/// # Examples
/// ```
/// use tourloop_core::{CostMetric, TravelTable};
///
/// let table = TravelTable::distances_only(vec![vec![0.0, 5.0], vec![5.0, 0.0]]);
/// assert_eq!(table.metric(), CostMetric::Distance);
/// assert_eq!(table.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TravelTable {
    /// Travel times in seconds, when the provider knows them.
    pub durations: Option<Vec<Vec<f64>>>,
    /// Travel distances in metres.
    pub distances: Vec<Vec<f64>>,
}

impl TravelTable {
    /// Construct a table with both durations and distances.
    #[must_use]
    pub const fn new(durations: Vec<Vec<f64>>, distances: Vec<Vec<f64>>) -> Self {
        Self {
            durations: Some(durations),
            distances,
        }
    }

    /// Construct a table that only knows distances.
    #[must_use]
    pub const fn distances_only(distances: Vec<Vec<f64>>) -> Self {
        Self {
            durations: None,
            distances,
        }
    }

    /// The metric the tour should minimise: time when known, else distance.
    #[must_use]
    pub const fn metric(&self) -> CostMetric {
        if self.durations.is_some() {
            CostMetric::Duration
        } else {
            CostMetric::Distance
        }
    }

    /// Rows of the matrix selected by [`TravelTable::metric`].
    #[must_use]
    pub fn cost_rows(&self) -> &[Vec<f64>] {
        self.durations.as_deref().unwrap_or(&self.distances)
    }

    /// Number of stops covered by the table.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cost_rows().len()
    }
}

/// Fetch pairwise travel costs for a set of stops.
///
/// Implementers must return square `n×n` matrices where `n == stops.len()`.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use tourloop_core::{Stop, TravelTable, TravelTimeError, TravelTimeProvider};
///
/// struct UnitProvider;
///
/// impl TravelTimeProvider for UnitProvider {
///     fn get_travel_time_matrix(&self, stops: &[Stop]) -> Result<TravelTable, TravelTimeError> {
///         if stops.is_empty() {
///             return Err(TravelTimeError::EmptyInput);
///         }
///         let n = stops.len();
///         let rows: Vec<Vec<f64>> = (0..n)
///             .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
///             .collect();
///         Ok(TravelTable::new(rows.clone(), rows))
///     }
/// }
///
/// let stop = Stop::new("Home", Coord { x: 0.0, y: 0.0 });
/// let table = UnitProvider.get_travel_time_matrix(&[stop])?;
/// assert_eq!(table.size(), 1);
/// # Ok::<(), TravelTimeError>(())
/// ```
pub trait TravelTimeProvider {
    /// Return travel costs for `stops`.
    ///
    /// Implementations must return `Err(TravelTimeError::EmptyInput)` when
    /// `stops` is empty.
    fn get_travel_time_matrix(&self, stops: &[Stop]) -> Result<TravelTable, TravelTimeError>;
}

impl<T: TravelTimeProvider + ?Sized> TravelTimeProvider for &T {
    fn get_travel_time_matrix(&self, stops: &[Stop]) -> Result<TravelTable, TravelTimeError> {
        (**self).get_travel_time_matrix(stops)
    }
}

/// Fetch the road polyline that follows a visiting order.
pub trait RouteGeometryProvider {
    /// Return the path through `stops` in `order` as WGS84 coordinates.
    ///
    /// An order with fewer than two entries yields an empty path.
    fn route_geometry(
        &self,
        stops: &[Stop],
        order: &[usize],
    ) -> Result<Vec<Coord<f64>>, TravelTimeError>;
}
