//! OSRM API response types for the Table and Route services.
//!
//! The Table API returns pairwise durations and distances between all
//! supplied coordinates; the Route API returns the road geometry through
//! them in order.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#table-service>

use serde::Deserialize;

/// OSRM Table API response.
///
/// The response contains matrices on success or an error message on failure.
/// The `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoTable"` - Table computation failed
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Matrix of durations in seconds; `None` cells have no route.
    pub durations: Option<Vec<Vec<Option<f64>>>>,

    /// Matrix of distances in metres; `None` cells have no route.
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

/// OSRM Route API response requested with `geometries=geojson`.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One route from [`RouteResponse`].
#[derive(Debug, Deserialize)]
pub struct Route {
    /// Full-resolution road geometry.
    pub geometry: Option<LineString>,
}

/// GeoJSON `LineString` with `[lon, lat]` positions.
#[derive(Debug, Deserialize)]
pub struct LineString {
    /// Positions along the line.
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

/// Whether an OSRM status code signals success.
#[must_use]
pub fn is_ok(code: &str) -> bool {
    code == "Ok"
}
