//! Resolve free-form addresses to stops.
//!
//! The [`Geocoder`] trait hides the remote lookup service. [`geocode_all`]
//! resolves a list of addresses in order and collects failures rather than
//! aborting at the first one, so callers can report every bad line at once.

mod error;

pub use error::GeocodeError;

use crate::Stop;

/// Look up the position of one address.
pub trait Geocoder {
    /// Resolve `address` to its best-matching stop.
    ///
    /// Implementations must return [`GeocodeError::EmptyAddress`] for blank
    /// input without contacting any service.
    fn geocode(&self, address: &str) -> Result<Stop, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str) -> Result<Stop, GeocodeError> {
        (**self).geocode(address)
    }
}

/// An address that could not be resolved, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAddress {
    /// The address as supplied.
    pub address: String,
    /// Why the lookup failed.
    pub error: GeocodeError,
}

/// Result of geocoding a batch of addresses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeocodeOutcome {
    /// Resolved stops in input order.
    pub stops: Vec<Stop>,
    /// Addresses that failed, in input order.
    pub failed: Vec<FailedAddress>,
}

impl GeocodeOutcome {
    /// Whether every address resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Geocode `addresses` sequentially.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourloop_core::{GeocodeError, Geocoder, Stop, geocode::geocode_all};
///
/// struct Origin;
///
/// impl Geocoder for Origin {
///     fn geocode(&self, address: &str) -> Result<Stop, GeocodeError> {
///         Ok(Stop::new(address, Coord { x: 0.0, y: 0.0 }))
///     }
/// }
///
/// let outcome = geocode_all(&Origin, &["Home".to_string()]);
/// assert!(outcome.is_complete());
/// assert_eq!(outcome.stops.len(), 1);
/// ```
pub fn geocode_all<G, S>(geocoder: &G, addresses: &[S]) -> GeocodeOutcome
where
    G: Geocoder + ?Sized,
    S: AsRef<str>,
{
    let total = addresses.len();
    let mut outcome = GeocodeOutcome::default();
    for (position, address) in addresses.iter().enumerate() {
        let address = address.as_ref();
        match geocoder.geocode(address) {
            Ok(stop) => {
                log::info!(
                    "geocoded {}/{total}: {address} -> ({:.6}, {:.6})",
                    position + 1,
                    stop.latitude(),
                    stop.longitude()
                );
                outcome.stops.push(stop);
            }
            Err(error) => {
                log::warn!("failed to geocode {}/{total}: {address}: {error}", position + 1);
                outcome.failed.push(FailedAddress {
                    address: address.to_owned(),
                    error,
                });
            }
        }
    }
    outcome
}
