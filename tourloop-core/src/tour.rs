//! Closed tours through every location.
//!
//! Aggregates a visiting order with its total cost.

use crate::CostMatrix;

/// A Hamiltonian cycle anchored at its first index.
///
/// `order` lists every location exactly once, starting with the anchor. The
/// return leg to the anchor is included in `total_cost` but not repeated in
/// `order`.
///
/// # Examples
/// ```
/// use tourloop_core::Tour;
///
/// let tour = Tour::new(vec![0, 2, 1], 12.0);
/// assert_eq!(tour.start(), Some(0));
/// assert_eq!(tour.closed_order(), vec![0, 2, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    /// Location indices in visiting order, beginning with the anchor.
    pub order: Vec<usize>,
    /// Summed cost of every leg including the return to the anchor.
    pub total_cost: f64,
}

impl Tour {
    /// Construct a tour from an order and its cost.
    #[must_use]
    pub const fn new(order: Vec<usize>, total_cost: f64) -> Self {
        Self { order, total_cost }
    }

    /// The anchor index, or `None` for an empty order.
    #[must_use]
    pub fn start(&self) -> Option<usize> {
        self.order.first().copied()
    }

    /// Number of locations visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the tour visits no locations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The visiting order with the anchor appended as the final leg.
    ///
    /// # Examples
    /// ```
    /// use tourloop_core::Tour;
    ///
    /// assert_eq!(Tour::new(vec![3], 0.0).closed_order(), vec![3, 3]);
    /// assert!(Tour::new(Vec::new(), 0.0).closed_order().is_empty());
    /// ```
    #[must_use]
    pub fn closed_order(&self) -> Vec<usize> {
        let mut closed = self.order.clone();
        if let Some(start) = self.start() {
            closed.push(start);
        }
        closed
    }

    /// The same cycle travelled in the opposite direction from the same anchor.
    ///
    /// The cost is recomputed against `matrix`, so asymmetric matrices yield
    /// the reversed direction's true cost.
    #[must_use]
    pub fn reversed(&self, matrix: &CostMatrix) -> Self {
        let mut order = self.order.clone();
        if let Some(tail) = order.get_mut(1..) {
            tail.reverse();
        }
        let reversed = Self::new(order, 0.0);
        let total_cost = reversed.cycle_cost(matrix);
        Self { total_cost, ..reversed }
    }

    /// Sum the legs of the closed order from left to right.
    ///
    /// Legs referencing indices outside `matrix` contribute nothing.
    #[must_use]
    pub fn cycle_cost(&self, matrix: &CostMatrix) -> f64 {
        leg_sum(&self.closed_order(), |from, to| matrix.get(from, to))
    }
}

/// Sum consecutive legs of `order` using `cost`, skipping missing legs.
pub(crate) fn leg_sum<F>(order: &[usize], cost: F) -> f64
where
    F: Fn(usize, usize) -> Option<f64>,
{
    order
        .windows(2)
        .filter_map(|leg| match leg {
            [from, to] => cost(*from, *to),
            _ => None,
        })
        .fold(0.0, |total, leg| total + leg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> CostMatrix {
        CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 10.0],
            vec![10.0, 0.0, 1.0],
            vec![1.0, 10.0, 0.0],
        ])
        .expect("valid matrix")
    }

    #[test]
    fn cycle_cost_includes_return_leg() {
        let tour = Tour::new(vec![0, 1, 2], 0.0);
        assert_eq!(tour.cycle_cost(&matrix()), 3.0);
    }

    #[test]
    fn reversed_keeps_anchor_and_recomputes_cost() {
        let tour = Tour::new(vec![0, 1, 2], 3.0);
        let reversed = tour.reversed(&matrix());
        assert_eq!(reversed.order, vec![0, 2, 1]);
        assert_eq!(reversed.total_cost, 30.0);
    }

    #[test]
    fn single_location_tour_has_zero_cost() {
        let tour = Tour::new(vec![0], 0.0);
        assert_eq!(tour.cycle_cost(&matrix()), 0.0);
        assert_eq!(tour.len(), 1);
    }
}
