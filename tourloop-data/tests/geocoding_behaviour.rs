//! Behavioural tests for the Nominatim geocoder and Geoapify autocomplete.

mod support;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::time::Duration;
use tourloop_core::{GeocodeError, Geocoder, Stop};
use tourloop_data::geocoding::{
    GeoapifyAutocomplete, GeoapifyAutocompleteConfig, NominatimGeocoder, NominatimGeocoderConfig,
    Suggestion,
};

use support::{CannedResponse, StubServer};

type ServerCell = RefCell<Option<StubServer>>;
type StopCell = RefCell<Option<Result<Stop, GeocodeError>>>;
type SuggestionCell = RefCell<Option<Result<Vec<Suggestion>, GeocodeError>>>;

#[fixture]
fn server() -> ServerCell {
    RefCell::new(None)
}

#[fixture]
fn stop() -> StopCell {
    RefCell::new(None)
}

#[fixture]
fn suggestions() -> SuggestionCell {
    RefCell::new(None)
}

fn base_url(server: &ServerCell) -> String {
    server
        .borrow()
        .as_ref()
        .expect("server must be initialised")
        .base_url()
        .to_owned()
}

#[given("a geocoding service that knows the castle")]
fn geocoder_knows_castle(#[from(server)] server: &ServerCell) {
    *server.borrow_mut() = Some(StubServer::serve(vec![CannedResponse::json(
        r#"[{"lat": "55.9486", "lon": "-3.1999",
             "display_name": "Edinburgh Castle, Castlehill, Edinburgh"}]"#,
    )]));
}

#[given("a geocoding service with no matches")]
fn geocoder_without_matches(#[from(server)] server: &ServerCell) {
    *server.borrow_mut() = Some(StubServer::serve(vec![CannedResponse::json("[]")]));
}

#[given("an autocomplete service with two candidates")]
fn autocomplete_with_candidates(#[from(server)] server: &ServerCell) {
    *server.borrow_mut() = Some(StubServer::serve(vec![CannedResponse::json(
        r#"{"results": [
            {"formatted": "221B Baker Street, London", "lat": 51.5238, "lon": -0.1586},
            {"formatted": "Baker Street Station", "lat": 51.5226, "lon": -0.1571},
            {"formatted": "Unplaced"}
        ]}"#,
    )]));
}

#[when("I geocode {address}")]
fn geocode(#[from(server)] server: &ServerCell, #[from(stop)] stop: &StopCell, address: String) {
    let config = NominatimGeocoderConfig::new("tourloop-test/0.1")
        .with_base_url(base_url(server))
        .with_min_interval(Duration::ZERO);
    let geocoder = NominatimGeocoder::new(&config).expect("geocoder should build");
    *stop.borrow_mut() = Some(geocoder.geocode(address.trim_matches('"')));
}

#[when("I ask for {limit} suggestions for {query}")]
fn suggest(
    #[from(server)] server: &ServerCell,
    #[from(suggestions)] suggestions: &SuggestionCell,
    limit: usize,
    query: String,
) {
    let endpoint = format!("{}/v1/geocode/autocomplete", base_url(server));
    let config = GeoapifyAutocompleteConfig::new("test-key").with_base_url(endpoint);
    let autocomplete = GeoapifyAutocomplete::new(&config).expect("client should build");
    *suggestions.borrow_mut() = Some(autocomplete.suggest(query.trim_matches('"'), limit));
}

#[then("the stop is labelled {label}")]
fn then_label(#[from(stop)] stop: &StopCell, label: String) {
    let resolved = stop
        .borrow()
        .clone()
        .expect("geocode must have run")
        .expect("expected a stop");
    assert_eq!(resolved.label, label.trim_matches('"'));
    assert_eq!(resolved.latitude(), 55.9486);
    assert_eq!(resolved.longitude(), -3.1999);
}

#[then("the search asked for one jsonv2 result")]
fn then_search_request(#[from(server)] server: &ServerCell) {
    let requests = server.borrow().as_ref().expect("server").requests();
    assert_eq!(
        requests,
        vec!["/search?q=Edinburgh+Castle&format=jsonv2&limit=1&addressdetails=0".to_owned()]
    );
}

#[then("no results are reported for {address}")]
fn then_no_results(#[from(stop)] stop: &StopCell, address: String) {
    assert_eq!(
        stop.borrow().clone().expect("geocode must have run"),
        Err(GeocodeError::NoResults {
            address: address.trim_matches('"').to_owned()
        })
    );
}

#[then("{count} suggestions are returned")]
fn then_suggestion_count(#[from(suggestions)] suggestions: &SuggestionCell, count: usize) {
    let list = suggestions
        .borrow()
        .clone()
        .expect("suggest must have run")
        .expect("expected suggestions");
    assert_eq!(list.len(), count);
}

#[then("the first suggestion is {label}")]
fn then_first_suggestion(#[from(suggestions)] suggestions: &SuggestionCell, label: String) {
    let list = suggestions
        .borrow()
        .clone()
        .expect("suggest must have run")
        .expect("expected suggestions");
    assert_eq!(
        list.first().map(|s| s.label.as_str()),
        Some(label.trim_matches('"'))
    );
}

#[scenario(path = "tests/features/geocoding.feature", index = 0)]
fn geocoding_known_address(server: ServerCell, stop: StopCell, suggestions: SuggestionCell) {
    let _ = (server, stop, suggestions);
}

#[scenario(path = "tests/features/geocoding.feature", index = 1)]
fn geocoding_unknown_address(server: ServerCell, stop: StopCell, suggestions: SuggestionCell) {
    let _ = (server, stop, suggestions);
}

#[scenario(path = "tests/features/geocoding.feature", index = 2)]
fn suggesting_addresses(server: ServerCell, stop: StopCell, suggestions: SuggestionCell) {
    let _ = (server, stop, suggestions);
}
