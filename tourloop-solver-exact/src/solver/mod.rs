//! `HeldKarpSolver` implementation of the core [`Solver`] trait.

use tourloop_core::{CostMatrix, InvalidInputError, SolveError, Solver, Tour};

use crate::held_karp::optimal_tour;

/// Default ceiling on locations, anchor included.
///
/// At 18 locations the table holds `2^17 × 17` cells, roughly 20 MiB.
pub const DEFAULT_MAX_LOCATIONS: usize = 18;

/// Hard ceiling regardless of configuration.
///
/// At 20 locations the table holds `2^19 × 19` cells, roughly 90 MiB.
/// Predecessors are stored as `u8`.
pub const MAX_SUPPORTED_LOCATIONS: usize = 20;

/// Configuration for [`HeldKarpSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldKarpConfig {
    /// Largest matrix, in locations, the solver will accept.
    ///
    /// Values above [`MAX_SUPPORTED_LOCATIONS`] are clamped.
    pub max_locations: usize,
}

impl Default for HeldKarpConfig {
    fn default() -> Self {
        Self {
            max_locations: DEFAULT_MAX_LOCATIONS,
        }
    }
}

impl HeldKarpConfig {
    /// The ceiling actually enforced.
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.max_locations.min(MAX_SUPPORTED_LOCATIONS)
    }
}

/// Exact solver using the Held–Karp dynamic programme.
///
/// The solver holds only configuration, so one instance can be shared
/// across threads.
///
/// # Examples
/// ```
/// use tourloop_core::{CostMatrix, Solver};
/// use tourloop_solver_exact::HeldKarpSolver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = CostMatrix::from_rows(vec![
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ])?;
/// let tour = HeldKarpSolver::new().solve(&matrix, 0)?;
/// assert_eq!(tour.total_cost, 80.0);
/// // Both directions cost 80; the lowest-index final node wins.
/// assert_eq!(tour.order, vec![0, 2, 3, 1]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKarpSolver {
    config: HeldKarpConfig,
}

impl HeldKarpSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: HeldKarpConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HeldKarpConfig {
        &self.config
    }

    fn check(&self, matrix: &CostMatrix, start: usize) -> Result<(), SolveError> {
        let locations = matrix.size();
        if start >= locations {
            return Err(InvalidInputError::StartOutOfRange { start, locations }.into());
        }
        let limit = self.config.effective_limit();
        if locations > limit {
            return Err(SolveError::SizeLimit { locations, limit });
        }
        Ok(())
    }
}

impl Solver for HeldKarpSolver {
    fn solve(&self, matrix: &CostMatrix, start: usize) -> Result<Tour, SolveError> {
        self.check(matrix, start)?;
        let locations = matrix.size();
        if locations == 1 {
            return Ok(Tour::new(vec![start], 0.0));
        }

        let tour = optimal_tour(matrix, start).map_err(|error| {
            log::warn!("could not reserve Held-Karp table for {locations} locations: {error}");
            // Only reached when the allocator refuses outright; overcommitting
            // systems may accept the reservation and fail on first touch.
            SolveError::SizeLimit {
                locations,
                limit: locations - 1,
            }
        })?;
        log::debug!(
            "held-karp solved {locations} locations from {start}: cost {}",
            tour.total_cost
        );
        Ok(tour)
    }
}

/// Validate raw rows and solve with the default configuration.
///
/// # Errors
///
/// Returns [`SolveError::InvalidInput`] for a malformed matrix or start and
/// [`SolveError::SizeLimit`] above [`DEFAULT_MAX_LOCATIONS`].
///
/// # Examples
/// ```
/// use tourloop_solver_exact::solve_rows;
///
/// let rows = vec![vec![0.0, 7.0], vec![3.0, 0.0]];
/// let tour = solve_rows(&rows, 0).expect("two locations always solve");
/// assert_eq!(tour.order, vec![0, 1]);
/// assert_eq!(tour.total_cost, 10.0);
/// ```
pub fn solve_rows(rows: &[Vec<f64>], start: usize) -> Result<Tour, SolveError> {
    let matrix = CostMatrix::from_row_slices(rows)?;
    HeldKarpSolver::new().solve(&matrix, start)
}
