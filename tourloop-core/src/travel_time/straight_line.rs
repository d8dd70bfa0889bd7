//! Great-circle fallback provider.
//!
//! Used when no routing service is reachable. Only distances are known, so a
//! tour planned from this table minimises straight-line distance.

use std::f64::consts::PI;

use geo::Coord;

use crate::Stop;

use super::{TravelTable, TravelTimeError, TravelTimeProvider};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[inline(always)]
fn to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Haversine distance in metres between two WGS84 coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourloop_core::travel_time::haversine_m;
///
/// let d = haversine_m(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
/// assert!((d - 111_195.0).abs() < 1.0);
/// ```
#[must_use]
pub fn haversine_m(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = to_radians(from.y);
    let lat2 = to_radians(to.y);
    let d_lat = to_radians(to.y - from.y);
    let d_lon = to_radians(to.x - from.x);

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// `TravelTimeProvider` returning symmetric haversine distances.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightLineProvider;

impl TravelTimeProvider for StraightLineProvider {
    fn get_travel_time_matrix(&self, stops: &[Stop]) -> Result<TravelTable, TravelTimeError> {
        if stops.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        let n = stops.len();
        let mut distances = vec![vec![0.0; n]; n];
        for (i, from) in stops.iter().enumerate() {
            for (j, to) in stops.iter().enumerate().skip(i + 1) {
                let d = haversine_m(from.location, to.location);
                distances[i][j] = d;
                distances[j][i] = d;
            }
        }
        Ok(TravelTable::distances_only(distances))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CostMetric;
    use rstest::rstest;

    #[rstest]
    fn identical_points_are_zero_apart() {
        let p = Coord { x: -61.5, y: 10.6 };
        assert_eq!(haversine_m(p, p), 0.0);
    }

    #[rstest]
    fn antipodes_are_half_circumference() {
        let d = haversine_m(Coord { x: 0.0, y: 0.0 }, Coord { x: 180.0, y: 0.0 });
        assert!((d - PI * EARTH_RADIUS_M).abs() < 1e-6);
    }

    #[rstest]
    fn table_is_symmetric_with_zero_diagonal() {
        let stops = vec![
            Stop::from_lat_lon("a", 10.64, -61.40),
            Stop::from_lat_lon("b", 10.66, -61.51),
            Stop::from_lat_lon("c", 10.65, -61.50),
        ];
        let table = StraightLineProvider
            .get_travel_time_matrix(&stops)
            .expect("table");
        assert_eq!(table.metric(), CostMetric::Distance);
        for i in 0..3 {
            assert_eq!(table.distances[i][i], 0.0);
            for j in 0..3 {
                assert_eq!(table.distances[i][j], table.distances[j][i]);
            }
        }
        assert!(table.distances[0][1] > 10_000.0);
    }

    #[rstest]
    fn empty_input_is_rejected() {
        assert_eq!(
            StraightLineProvider.get_travel_time_matrix(&[]),
            Err(TravelTimeError::EmptyInput)
        );
    }
}
