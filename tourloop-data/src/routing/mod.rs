//! HTTP-based travel time providers for routing services.
//!
//! This module provides [`HttpTravelTimeProvider`], an implementation of
//! [`tourloop_core::TravelTimeProvider`] and
//! [`tourloop_core::RouteGeometryProvider`] backed by an OSRM service.
//!
//! # Architecture
//!
//! The Table API supplies pairwise durations and distances; the Route API
//! supplies the road polyline through a solved tour. The synchronous core
//! traits are implemented by blocking on async HTTP calls internally.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tourloop_core::{CostMetric, Stop, TravelTimeProvider};
//! use tourloop_data::routing::{HttpTravelTimeProvider, HttpTravelTimeProviderConfig};
//!
//! let config = HttpTravelTimeProviderConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpTravelTimeProvider::with_config(config)?;
//!
//! let stops = vec![
//!     Stop::from_lat_lon("Home", 51.5, -0.1),
//!     Stop::from_lat_lon("Shop", 51.6, -0.2),
//! ];
//!
//! let table = provider.get_travel_time_matrix(&stops)?;
//! assert_eq!(table.metric(), CostMetric::Duration);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub(crate) mod osrm;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_OSRM_BASE_URL, DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpTravelTimeProvider,
    HttpTravelTimeProviderConfig,
};
