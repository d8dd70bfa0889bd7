//! Validated square cost matrices.
//!
//! A [`CostMatrix`] is the solver's only input besides the start index. It is
//! stored row-major in a single allocation and is read-only once built.

use crate::solver::InvalidInputError;

/// Square matrix of non-negative, finite travel costs.
///
/// `cost(i, j)` is the cost of travelling from location `i` to location `j`.
/// The diagonal is always zero. The matrix may be asymmetric.
///
/// # Examples
/// ```
/// use tourloop_core::CostMatrix;
///
/// # fn main() -> Result<(), tourloop_core::InvalidInputError> {
/// let matrix = CostMatrix::from_rows(vec![vec![0.0, 4.0], vec![6.0, 0.0]])?;
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.cost(1, 0), 6.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    size: usize,
    costs: Vec<f64>,
}

impl CostMatrix {
    /// Validate and flatten a matrix given as rows.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] when the matrix is empty or not square,
    /// or when an entry is negative, non-finite, or a non-zero diagonal.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, InvalidInputError> {
        Self::from_row_slices(&rows)
    }

    /// Validate and flatten borrowed rows.
    ///
    /// # Errors
    ///
    /// See [`CostMatrix::from_rows`].
    pub fn from_row_slices<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, InvalidInputError> {
        let size = rows.len();
        if size == 0 {
            return Err(InvalidInputError::Empty);
        }

        let mut costs = Vec::with_capacity(size * size);
        for (from, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(InvalidInputError::NotSquare {
                    row: from,
                    expected: size,
                    found: row.len(),
                });
            }
            for (to, &value) in row.iter().enumerate() {
                validate_entry(from, to, value)?;
                costs.push(value);
            }
        }

        Ok(Self { size, costs })
    }

    /// Number of locations covered by the matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Travel cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    #[must_use]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        assert!(
            from < self.size && to < self.size,
            "cost index ({from}, {to}) out of range for {n}x{n} matrix",
            n = self.size
        );
        self.costs[from * self.size + to]
    }

    /// Travel cost from `from` to `to`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        if from < self.size && to < self.size {
            self.costs.get(from * self.size + to).copied()
        } else {
            None
        }
    }

    /// Whether `cost(i, j) == cost(j, i)` for every pair.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.cost(i, j) == self.cost(j, i)))
    }

    /// Copy the matrix back into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.costs
            .chunks(self.size)
            .map(<[f64]>::to_vec)
            .collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = InvalidInputError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

fn validate_entry(from: usize, to: usize, value: f64) -> Result<(), InvalidInputError> {
    if !value.is_finite() {
        return Err(InvalidInputError::NonFiniteCost { from, to });
    }
    if value < 0.0 {
        return Err(InvalidInputError::NegativeCost { from, to, value });
    }
    if from == to && value != 0.0 {
        return Err(InvalidInputError::NonZeroDiagonal { index: from, value });
    }
    Ok(())
}
