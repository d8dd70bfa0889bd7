//! Deep links that open a planned tour in a navigation app.

use thiserror::Error;
use url::form_urlencoded::byte_serialize;

use crate::Stop;

/// Base URL of the Google Maps directions API.
pub const GOOGLE_MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

/// Errors from [`google_maps_directions_url`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Directions need an origin and a destination.
    #[error("a directions link needs at least two entries, found {found}")]
    TooShort {
        /// Length of the supplied order.
        found: usize,
    },
    /// The order names a stop that does not exist.
    #[error("order references stop {index}, but only {stops} stops exist")]
    UnknownStop {
        /// Offending index.
        index: usize,
        /// Number of stops available.
        stops: usize,
    },
}

fn lat_lon(stop: &Stop) -> String {
    format!("{:.6},{:.6}", stop.latitude(), stop.longitude())
}

/// Build a driving-directions URL through `stops` in `order`.
///
/// The first entry is the origin, the last the destination, and everything in
/// between becomes an ordered waypoint. Pass a closed order to get a round
/// trip.
///
/// # Errors
///
/// Returns [`NavigationError`] when `order` is shorter than two entries or
/// names a missing stop.
///
/// # Examples
/// ```
/// use tourloop_core::{Stop, navigation::google_maps_directions_url};
///
/// # fn main() -> Result<(), tourloop_core::navigation::NavigationError> {
/// let stops = vec![Stop::from_lat_lon("Home", 1.0, 2.0), Stop::from_lat_lon("Shop", 3.0, 4.0)];
/// let url = google_maps_directions_url(&stops, &[0, 1, 0])?;
/// assert_eq!(
///     url,
///     "https://www.google.com/maps/dir/?api=1&origin=1.000000,2.000000\
///      &destination=1.000000,2.000000&waypoints=3.000000%2C4.000000&travelmode=driving"
/// );
/// # Ok(())
/// # }
/// ```
pub fn google_maps_directions_url(
    stops: &[Stop],
    order: &[usize],
) -> Result<String, NavigationError> {
    let ordered = order
        .iter()
        .map(|&index| {
            stops.get(index).ok_or(NavigationError::UnknownStop {
                index,
                stops: stops.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let [origin, waypoints @ .., destination] = ordered.as_slice() else {
        return Err(NavigationError::TooShort { found: order.len() });
    };

    let mut url = format!(
        "{GOOGLE_MAPS_DIRECTIONS_URL}?api=1&origin={}&destination={}",
        lat_lon(origin),
        lat_lon(destination)
    );
    if !waypoints.is_empty() {
        let joined = waypoints
            .iter()
            .map(|stop| lat_lon(stop))
            .collect::<Vec<_>>()
            .join("|");
        let encoded: String = byte_serialize(joined.as_bytes()).collect();
        url.push_str("&waypoints=");
        url.push_str(&encoded);
    }
    url.push_str("&travelmode=driving");
    Ok(url)
}
