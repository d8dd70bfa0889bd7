//! Nominatim search adapter.
//!
//! Nominatim's usage policy asks for an identifying user agent and at most
//! one request per second, so both are part of the configuration.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::Deserialize;
use tourloop_core::{GeocodeError, Geocoder, Stop};
use url::Url;

use super::{endpoint, geocode_error};
use crate::ProviderBuildError;
use crate::client::BlockingClient;

/// Public OpenStreetMap Nominatim instance.
pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for [`NominatimGeocoder`].
///
/// There is no `Default`: the user agent must identify the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominatimGeocoderConfig {
    /// Service root, without the `/search` path.
    pub base_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Minimum spacing between consecutive requests.
    pub min_interval: Duration,
}

impl NominatimGeocoderConfig {
    /// Configuration for the public instance with the given user agent.
    #[must_use]
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_BASE_URL.to_owned(),
            user_agent: user_agent.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }

    /// Point at another Nominatim instance.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the minimum spacing between requests.
    #[must_use]
    pub const fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// [`Geocoder`] backed by the Nominatim search API.
///
/// Requests are serialised through an internal lock so the configured
/// interval holds even when the geocoder is shared between threads.
#[derive(Debug)]
pub struct NominatimGeocoder {
    http: BlockingClient,
    search: Url,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimGeocoder {
    /// Build a geocoder from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderBuildError::MissingSetting`] for a blank user agent
    /// or base URL, [`ProviderBuildError::InvalidBaseUrl`] when the base URL
    /// does not parse, and a client or runtime error if those fail to build.
    pub fn new(config: &NominatimGeocoderConfig) -> Result<Self, ProviderBuildError> {
        if config.user_agent.trim().is_empty() {
            return Err(ProviderBuildError::MissingSetting {
                field: "user_agent",
            });
        }
        let base = config.base_url.trim().trim_end_matches('/');
        let search = if base.is_empty() {
            endpoint(base)?
        } else {
            endpoint(&format!("{base}/search"))?
        };
        let http = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self {
            http,
            search,
            min_interval: config.min_interval,
            last_request: Mutex::new(None),
        })
    }

    fn search_url(&self, address: &str) -> Url {
        let mut url = self.search.clone();
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1")
            .append_pair("addressdetails", "0");
        url
    }

    /// Wait until `min_interval` has passed since the previous request.
    fn pace(&self) {
        let mut last = self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = *last {
            let wait = self.min_interval.saturating_sub(previous.elapsed());
            if !wait.is_zero() {
                log::debug!("pacing Nominatim request by {}ms", wait.as_millis());
                std::thread::sleep(wait);
            }
        }
        *last = Some(Instant::now());
    }
}

fn place_to_stop(address: &str, places: Vec<Place>) -> Result<Stop, GeocodeError> {
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NoResults {
            address: address.to_owned(),
        })?;
    let latitude = parse_degrees("lat", &place.lat)?;
    let longitude = parse_degrees("lon", &place.lon)?;
    let label = place
        .display_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| address.to_owned());
    Ok(Stop::from_lat_lon(label, latitude, longitude))
}

fn parse_degrees(field: &str, raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| GeocodeError::ParseError {
            message: format!("{field} is not a number: {raw:?}"),
        })
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Stop, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        self.pace();
        let url = self.search_url(address);
        let places: Vec<Place> = self
            .http
            .block_on(self.http.get_json(url.as_str(), None))
            .map_err(|failure| geocode_error(failure, &self.search))?;
        place_to_stop(address, places)
    }
}
