//! Geoapify address autocomplete.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tourloop_core::GeocodeError;
use url::Url;

use super::{endpoint, geocode_error};
use crate::ProviderBuildError;
use crate::client::BlockingClient;
use crate::routing::DEFAULT_USER_AGENT;

/// Geoapify autocomplete endpoint.
pub const DEFAULT_GEOAPIFY_BASE_URL: &str = "https://api.geoapify.com/v1/geocode/autocomplete";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for [`GeoapifyAutocomplete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoapifyAutocompleteConfig {
    /// Geoapify API key.
    pub api_key: String,
    /// Full endpoint URL.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl GeoapifyAutocompleteConfig {
    /// Configuration for the public endpoint with the given key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEOAPIFY_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Use another endpoint.
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
}

/// One candidate address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// Display label.
    pub label: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    results: Vec<AutocompleteResult>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResult {
    formatted: Option<String>,
    address_line1: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl AutocompleteResult {
    fn into_suggestion(self) -> Option<Suggestion> {
        let label = self
            .formatted
            .or(self.address_line1)
            .filter(|label| !label.trim().is_empty())?;
        Some(Suggestion {
            label,
            latitude: self.lat?,
            longitude: self.lon?,
        })
    }
}

/// Type-ahead address suggestions from Geoapify.
#[derive(Debug)]
pub struct GeoapifyAutocomplete {
    http: BlockingClient,
    endpoint: Url,
    api_key: String,
}

impl GeoapifyAutocomplete {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderBuildError::MissingSetting`] for a blank API key or
    /// endpoint and [`ProviderBuildError::InvalidBaseUrl`] when the endpoint
    /// does not parse.
    pub fn new(config: &GeoapifyAutocompleteConfig) -> Result<Self, ProviderBuildError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(ProviderBuildError::MissingSetting { field: "api_key" });
        }
        let endpoint = endpoint(config.base_url.trim())?;
        let http = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self {
            http,
            endpoint,
            api_key: api_key.to_owned(),
        })
    }

    fn query_url(&self, query: &str, limit: usize) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("text", query)
            .append_pair("limit", &limit.to_string())
            .append_pair("format", "json")
            .append_pair("apiKey", &self.api_key);
        url
    }

    /// Suggest up to `limit` addresses matching `query`.
    ///
    /// A blank query returns no suggestions without contacting the service.
    ///
    /// # Errors
    ///
    /// Returns a [`GeocodeError`] when the request fails or the response does
    /// not parse.
    pub fn suggest(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let url = self.query_url(query, limit);
        let response: AutocompleteResponse = self
            .http
            .block_on(self.http.get_json(url.as_str(), None))
            .map_err(|failure| geocode_error(failure, &self.endpoint))?;
        let suggestions: Vec<Suggestion> = response
            .results
            .into_iter()
            .filter_map(AutocompleteResult::into_suggestion)
            .take(limit)
            .collect();
        log::debug!("{} suggestions for {query:?}", suggestions.len());
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn autocomplete() -> GeoapifyAutocomplete {
        let config = GeoapifyAutocompleteConfig::new("secret")
            .with_base_url("http://autocomplete.example.com/v1/geocode/autocomplete");
        GeoapifyAutocomplete::new(&config).expect("client should build")
    }

    #[rstest]
    fn query_url_carries_all_parameters(autocomplete: GeoapifyAutocomplete) {
        assert_eq!(
            autocomplete.query_url("Baker St", 5).as_str(),
            "http://autocomplete.example.com/v1/geocode/autocomplete\
             ?text=Baker+St&limit=5&format=json&apiKey=secret"
        );
    }

    #[rstest]
    #[case("", 5)]
    #[case("   ", 5)]
    #[case("Baker St", 0)]
    fn blank_query_returns_nothing(
        autocomplete: GeoapifyAutocomplete,
        #[case] query: &str,
        #[case] limit: usize,
    ) {
        assert_eq!(autocomplete.suggest(query, limit), Ok(Vec::new()));
    }

    #[rstest]
    fn api_key_is_required() {
        let err = GeoapifyAutocomplete::new(&GeoapifyAutocompleteConfig::new(""))
            .expect_err("key required");
        assert!(matches!(
            err,
            ProviderBuildError::MissingSetting { field: "api_key" }
        ));
    }

    #[rstest]
    fn incomplete_results_are_skipped() {
        let json = r#"{"results": [
            {"formatted": "221B Baker St, London", "lat": 51.5238, "lon": -0.1586},
            {"address_line1": "Baker Street Station", "lat": 51.5226, "lon": -0.1571},
            {"formatted": "Nowhere"},
            {"lat": 1.0, "lon": 2.0}
        ]}"#;
        let response: AutocompleteResponse = serde_json::from_str(json).expect("response");

        let suggestions: Vec<Suggestion> = response
            .results
            .into_iter()
            .filter_map(AutocompleteResult::into_suggestion)
            .collect();

        assert_eq!(
            suggestions,
            vec![
                Suggestion {
                    label: "221B Baker St, London".to_owned(),
                    latitude: 51.5238,
                    longitude: -0.1586,
                },
                Suggestion {
                    label: "Baker Street Station".to_owned(),
                    latitude: 51.5226,
                    longitude: -0.1571,
                },
            ]
        );
    }

    #[rstest]
    fn missing_results_array_is_empty() {
        let response: AutocompleteResponse = serde_json::from_str("{}").expect("response");
        assert!(response.results.is_empty());
    }
}
