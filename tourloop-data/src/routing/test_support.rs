//! Test utilities for routing providers.
//!
//! This module provides [`StubTravelTimeProvider`], a deterministic test double
//! for [`TravelTimeProvider`] that returns pre-configured responses without
//! making actual HTTP requests.

use tourloop_core::{Stop, TravelTable, TravelTimeError, TravelTimeProvider};

/// Stub `TravelTimeProvider` for testing.
///
/// # Example
///
/// ```
/// use tourloop_data::routing::test_support::StubTravelTimeProvider;
/// use tourloop_core::{Stop, TravelTable, TravelTimeProvider};
///
/// let rows = vec![vec![0.0, 60.0], vec![60.0, 0.0]];
/// let provider = StubTravelTimeProvider::with_table(TravelTable::new(rows.clone(), rows));
///
/// let stops = vec![
///     Stop::from_lat_lon("a", 0.0, 0.0),
///     Stop::from_lat_lon("b", 1.0, 1.0),
/// ];
///
/// assert!(provider.get_travel_time_matrix(&stops).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct StubTravelTimeProvider {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Table(TravelTable),
    Error(TravelTimeError),
}

impl StubTravelTimeProvider {
    /// Create a provider that returns the given table for any non-empty input.
    #[must_use]
    pub const fn with_table(table: TravelTable) -> Self {
        Self {
            response: StubResponse::Table(table),
        }
    }

    /// Create a provider that returns the given error.
    ///
    /// Empty input still returns `TravelTimeError::EmptyInput`.
    #[must_use]
    pub const fn with_error(error: TravelTimeError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }

    /// Create a provider returning a unit table of the given size.
    ///
    /// Zero on the diagonal, one second and one metre elsewhere.
    #[must_use]
    pub fn with_unit_table(size: usize) -> Self {
        let rows: Vec<Vec<f64>> = (0..size)
            .map(|i| (0..size).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
            .collect();
        Self::with_table(TravelTable::new(rows.clone(), rows))
    }
}

impl TravelTimeProvider for StubTravelTimeProvider {
    fn get_travel_time_matrix(&self, stops: &[Stop]) -> Result<TravelTable, TravelTimeError> {
        if stops.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }

        match &self.response {
            StubResponse::Table(table) => Ok(table.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
