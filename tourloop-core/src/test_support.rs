//! Deterministic collaborators for tests and offline demos.
//!
//! None of these perform I/O, so planner and solver tests can run without a
//! network.

use std::collections::HashMap;

use crate::{
    CostMatrix, GeocodeError, Geocoder, SolveError, Solver, Stop, Tour, TravelTable,
    TravelTimeError, TravelTimeProvider, solver::InvalidInputError,
};

/// Deterministic `TravelTimeProvider` returning one-second, one-metre edges.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnitTravelTimeProvider;

impl TravelTimeProvider for UnitTravelTimeProvider {
    fn get_travel_time_matrix(&self, stops: &[Stop]) -> Result<TravelTable, TravelTimeError> {
        if stops.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        let n = stops.len();
        let mut rows = vec![vec![1.0; n]; n];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        Ok(TravelTable::new(rows.clone(), rows))
    }
}

/// `TravelTimeProvider` that always fails with the configured error.
///
/// Empty input still returns `TravelTimeError::EmptyInput`.
#[derive(Debug, Clone)]
pub struct FailingTravelTimeProvider {
    error: TravelTimeError,
}

impl FailingTravelTimeProvider {
    /// Create a provider that returns `error` for any non-empty input.
    #[must_use]
    pub const fn new(error: TravelTimeError) -> Self {
        Self { error }
    }
}

impl TravelTimeProvider for FailingTravelTimeProvider {
    fn get_travel_time_matrix(&self, stops: &[Stop]) -> Result<TravelTable, TravelTimeError> {
        if stops.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        Err(self.error.clone())
    }
}

/// `Geocoder` backed by an in-memory address book.
///
/// Unknown addresses yield `GeocodeError::NoResults`.
#[derive(Default, Debug, Clone)]
pub struct FixedGeocoder {
    entries: HashMap<String, Stop>,
}

impl FixedGeocoder {
    /// Register `stop` as the answer for `address`.
    #[must_use]
    pub fn with_stop(mut self, address: impl Into<String>, stop: Stop) -> Self {
        self.entries.insert(address.into(), stop);
        self
    }
}

impl Geocoder for FixedGeocoder {
    fn geocode(&self, address: &str) -> Result<Stop, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }
        self.entries
            .get(address)
            .cloned()
            .ok_or_else(|| GeocodeError::NoResults {
                address: address.to_owned(),
            })
    }
}

/// `Solver` that visits locations in index order from the start.
///
/// Useful for pipeline tests that should not depend on optimisation.
#[derive(Default, Debug, Copy, Clone)]
pub struct IdentitySolver;

impl Solver for IdentitySolver {
    fn solve(&self, matrix: &CostMatrix, start: usize) -> Result<Tour, SolveError> {
        if start >= matrix.size() {
            return Err(InvalidInputError::StartOutOfRange {
                start,
                locations: matrix.size(),
            }
            .into());
        }
        let order: Vec<usize> = std::iter::once(start)
            .chain((0..matrix.size()).filter(|&i| i != start))
            .collect();
        let tour = Tour::new(order, 0.0);
        let total_cost = tour.cycle_cost(matrix);
        Ok(Tour { total_cost, ..tour })
    }
}
