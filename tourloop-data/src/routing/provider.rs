//! HTTP-based `TravelTimeProvider` using OSRM's Table and Route APIs.
//!
//! This module provides [`HttpTravelTimeProvider`], an implementation of the
//! [`TravelTimeProvider`] and [`RouteGeometryProvider`] traits that talks to
//! an OSRM routing service over HTTP.
//!
//! # Example
//!
//! ```no_run
//! use tourloop_data::routing::HttpTravelTimeProvider;
//! use tourloop_core::{Stop, TravelTimeProvider};
//!
//! let provider = HttpTravelTimeProvider::new("http://localhost:5000")?;
//! let stops = vec![
//!     Stop::from_lat_lon("Home", 51.5, -0.1),
//!     Stop::from_lat_lon("Shop", 51.6, -0.2),
//! ];
//!
//! let table = provider.get_travel_time_matrix(&stops)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use geo::Coord;
use tourloop_core::{RouteGeometryProvider, Stop, TravelTable, TravelTimeError, TravelTimeProvider};

use super::osrm::{RouteResponse, TableResponse, is_ok};
use crate::ProviderBuildError;
use crate::client::{BlockingClient, JsonFailure, RequestFailure};

/// Public OSRM demo server.
pub const DEFAULT_OSRM_BASE_URL: &str = "https://router.project-osrm.org";

/// Default OSRM routing profile.
pub const DEFAULT_PROFILE: &str = "driving";

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "tourloop-routing/0.1";

/// Default Table request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default Route request timeout in seconds; full geometries are slow.
const DEFAULT_ROUTE_TIMEOUT_SECS: u64 = 60;

/// Configuration for [`HttpTravelTimeProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTravelTimeProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// OSRM profile segment, e.g. `driving`.
    pub profile: String,
    /// Table request timeout.
    pub timeout: Duration,
    /// Route request timeout.
    pub route_timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpTravelTimeProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_BASE_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            route_timeout: Duration::from_secs(DEFAULT_ROUTE_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpTravelTimeProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the OSRM profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the Table request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the Route request timeout.
    #[must_use]
    pub const fn with_route_timeout(mut self, timeout: Duration) -> Self {
        self.route_timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based travel time provider using the OSRM Table API.
///
/// The synchronous traits are implemented by blocking on asynchronous HTTP
/// requests. The provider owns a Tokio runtime that is reused across calls.
///
/// # Runtime behaviour
///
/// From outside any Tokio runtime the provider uses its own runtime. From
/// within a multi-threaded runtime it borrows that runtime's handle with
/// [`tokio::task::block_in_place`]. From within a `current_thread` runtime
/// it falls back to its own runtime, which blocks the caller until the
/// request completes.
#[derive(Debug)]
pub struct HttpTravelTimeProvider {
    http: BlockingClient,
    config: HttpTravelTimeProviderConfig,
}

impl HttpTravelTimeProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpTravelTimeProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or profile is blank, or the HTTP
    /// client or Tokio runtime fails to build.
    pub fn with_config(config: HttpTravelTimeProviderConfig) -> Result<Self, ProviderBuildError> {
        if config.base_url.trim().is_empty() {
            return Err(ProviderBuildError::MissingSetting { field: "base_url" });
        }
        if config.profile.trim().is_empty() {
            return Err(ProviderBuildError::MissingSetting { field: "profile" });
        }
        let http = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { http, config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpTravelTimeProviderConfig {
        &self.config
    }

    fn service_url(&self, service: &str, coords: &str) -> String {
        format!(
            "{}/{service}/v1/{}/{coords}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile
        )
    }

    /// Build the OSRM Table API URL for the given stops.
    ///
    /// Coordinates are semicolon-separated `lon,lat` pairs with six decimals.
    fn build_table_url(&self, stops: &[Stop]) -> String {
        let coords = join_coords(stops.iter());
        format!(
            "{}?annotations=duration,distance",
            self.service_url("table", &coords)
        )
    }

    /// Build the OSRM Route API URL visiting `stops` in `order`.
    fn build_route_url(&self, stops: &[Stop], order: &[usize]) -> Result<String, TravelTimeError> {
        let ordered = order
            .iter()
            .map(|&index| {
                stops.get(index).ok_or(TravelTimeError::UnknownStop {
                    index,
                    stops: stops.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let coords = join_coords(ordered.into_iter());
        Ok(format!(
            "{}?overview=full&geometries=geojson&steps=false",
            self.service_url("route", &coords)
        ))
    }

    /// Convert an OSRM Table response to a [`TravelTable`].
    fn convert_table(
        response: TableResponse,
        expected: usize,
    ) -> Result<TravelTable, TravelTimeError> {
        if !is_ok(&response.code) {
            return Err(TravelTimeError::ServiceError {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }
        let durations = response
            .durations
            .ok_or_else(|| TravelTimeError::ParseError {
                message: "OSRM response missing durations array".to_owned(),
            })?;
        let distances = response
            .distances
            .ok_or_else(|| TravelTimeError::ParseError {
                message: "OSRM response missing distances array".to_owned(),
            })?;
        Ok(TravelTable::new(
            finite_cells(durations, expected)?,
            finite_cells(distances, expected)?,
        ))
    }

    /// Convert an OSRM Route response to a `[lon, lat]` polyline.
    fn convert_route(response: RouteResponse) -> Result<Vec<Coord<f64>>, TravelTimeError> {
        if !is_ok(&response.code) {
            return Err(TravelTimeError::ServiceError {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }
        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| TravelTimeError::ParseError {
                message: "OSRM route response contained no routes".to_owned(),
            })?;
        let coordinates = route
            .geometry
            .map(|line| line.coordinates)
            .unwrap_or_default();
        if coordinates.is_empty() {
            return Err(TravelTimeError::ParseError {
                message: "OSRM route response missing geometry coordinates".to_owned(),
            });
        }
        Ok(coordinates
            .into_iter()
            .map(|[lon, lat]| Coord { x: lon, y: lat })
            .collect())
    }
}

fn join_coords<'a>(stops: impl Iterator<Item = &'a Stop>) -> String {
    stops
        .map(|stop| format!("{:.6},{:.6}", stop.longitude(), stop.latitude()))
        .collect::<Vec<_>>()
        .join(";")
}

/// Replace missing, negative and non-finite cells with infinity and check
/// the table is `expected × expected`.
fn finite_cells(
    rows: Vec<Vec<Option<f64>>>,
    expected: usize,
) -> Result<Vec<Vec<f64>>, TravelTimeError> {
    if rows.len() != expected || rows.iter().any(|row| row.len() != expected) {
        return Err(TravelTimeError::ParseError {
            message: format!("OSRM table does not cover {expected} stops"),
        });
    }
    Ok(rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| {
                    cell.filter(|&v| v >= 0.0 && v.is_finite())
                        .unwrap_or(f64::INFINITY)
                })
                .collect()
        })
        .collect())
}

pub(crate) fn travel_error(failure: JsonFailure, url: &str) -> TravelTimeError {
    match failure {
        JsonFailure::Request(RequestFailure::Timeout { timeout_secs }) => TravelTimeError::Timeout {
            url: url.to_owned(),
            timeout_secs,
        },
        JsonFailure::Request(RequestFailure::Status { status, message }) => {
            TravelTimeError::HttpError {
                url: url.to_owned(),
                status,
                message,
            }
        }
        JsonFailure::Request(RequestFailure::Network { message }) => {
            TravelTimeError::NetworkError {
                url: url.to_owned(),
                message,
            }
        }
        JsonFailure::Decode(message) => TravelTimeError::ParseError { message },
    }
}

impl TravelTimeProvider for HttpTravelTimeProvider {
    /// Fetch durations and distances for the given stops.
    ///
    /// A single stop needs no request and yields a zero table.
    fn get_travel_time_matrix(&self, stops: &[Stop]) -> Result<TravelTable, TravelTimeError> {
        match stops.len() {
            0 => return Err(TravelTimeError::EmptyInput),
            1 => return Ok(TravelTable::new(vec![vec![0.0]], vec![vec![0.0]])),
            _ => {}
        }

        let url = self.build_table_url(stops);
        log::debug!("requesting OSRM table for {} stops", stops.len());
        let response: TableResponse = self
            .http
            .block_on(self.http.get_json(&url, None))
            .map_err(|failure| travel_error(failure, &url))?;
        Self::convert_table(response, stops.len())
    }
}

impl RouteGeometryProvider for HttpTravelTimeProvider {
    fn route_geometry(
        &self,
        stops: &[Stop],
        order: &[usize],
    ) -> Result<Vec<Coord<f64>>, TravelTimeError> {
        if order.len() < 2 {
            return Ok(Vec::new());
        }

        let url = self.build_route_url(stops, order)?;
        log::debug!("requesting OSRM route through {} waypoints", order.len());
        let response: RouteResponse = self
            .http
            .block_on(self.http.get_json(&url, Some(self.config.route_timeout)))
            .map_err(|failure| travel_error(failure, &url))?;
        Self::convert_route(response)
    }
}
