//! HTTP geocoding and address autocomplete.
//!
//! [`NominatimGeocoder`] implements [`tourloop_core::Geocoder`] against the
//! OpenStreetMap Nominatim search API. [`GeoapifyAutocomplete`] offers
//! type-ahead suggestions for interactive front ends; it is not a geocoder
//! and the planner never calls it.

mod autocomplete;
mod nominatim;

use tourloop_core::GeocodeError;
use url::Url;

use crate::ProviderBuildError;
use crate::client::{JsonFailure, RequestFailure};

pub use autocomplete::{
    DEFAULT_GEOAPIFY_BASE_URL, GeoapifyAutocomplete, GeoapifyAutocompleteConfig, Suggestion,
};
pub use nominatim::{DEFAULT_NOMINATIM_BASE_URL, NominatimGeocoder, NominatimGeocoderConfig};

/// Parse a configured endpoint, rejecting blank values.
fn endpoint(url: &str) -> Result<Url, ProviderBuildError> {
    if url.trim().is_empty() {
        return Err(ProviderBuildError::MissingSetting { field: "base_url" });
    }
    Url::parse(url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
        url: url.to_owned(),
        source,
    })
}

/// Map a transport failure onto the core error, naming the endpoint only.
///
/// Query strings carry addresses and API keys, so they never reach errors.
fn geocode_error(failure: JsonFailure, endpoint: &Url) -> GeocodeError {
    let url = endpoint.as_str().to_owned();
    match failure {
        JsonFailure::Request(RequestFailure::Timeout { timeout_secs }) => {
            GeocodeError::Timeout { url, timeout_secs }
        }
        JsonFailure::Request(RequestFailure::Status { status, message }) => {
            GeocodeError::HttpError {
                url,
                status,
                message,
            }
        }
        JsonFailure::Request(RequestFailure::Network { message }) => {
            GeocodeError::NetworkError { url, message }
        }
        JsonFailure::Decode(message) => GeocodeError::ParseError { message },
    }
}
