//! HTTP adapters for the Tourloop planner.
//!
//! Responsibilities:
//! - Implement the core [`TravelTimeProvider`](tourloop_core::TravelTimeProvider),
//!   [`RouteGeometryProvider`](tourloop_core::RouteGeometryProvider) and
//!   [`Geocoder`](tourloop_core::Geocoder) traits against public services.
//! - Offer address autocomplete for interactive front ends.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `tourloop-core`).
//! - Keep the traits synchronous; each adapter blocks on an owned runtime.
//!
//! Invariants:
//! - Adapters are `Send + Sync` and hold no global mutable state.

mod client;

pub mod geocoding;
pub mod routing;

pub use client::ProviderBuildError;
