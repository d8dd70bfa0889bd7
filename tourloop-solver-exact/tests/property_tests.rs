//! Property-based tests for the Held–Karp solver.
//!
//! # Invariants tested
//!
//! - **Optimality:** the cost matches an exhaustive search for 2 to 8 locations.
//! - **Shape:** the order is a permutation led by the anchor.
//! - **Consistency:** the reported cost equals the cost of the returned cycle.
//! - **Reversal:** on symmetric matrices the reversed tour costs the same.
//! - **Determinism:** repeated calls return identical tours.


use proptest::prelude::*;
use tourloop_core::Solver;
use tourloop_solver_exact::HeldKarpSolver;

use proptest_support::{
    brute_force_cost, costs_match, problem_strategy, symmetric_problem_strategy,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: the DP optimum equals the exhaustive optimum.
    #[test]
    fn cost_matches_brute_force((matrix, start) in problem_strategy(8)) {
        let tour = HeldKarpSolver::new().solve(&matrix, start).expect("solvable");
        let expected = brute_force_cost(&matrix, start);
        prop_assert!(
            costs_match(tour.total_cost, expected),
            "held-karp cost {} differs from brute force {}",
            tour.total_cost,
            expected
        );
    }

    /// Property: every location appears exactly once and the anchor leads.
    #[test]
    fn order_is_anchored_permutation((matrix, start) in problem_strategy(8)) {
        let tour = HeldKarpSolver::new().solve(&matrix, start).expect("solvable");
        prop_assert_eq!(tour.start(), Some(start));
        let mut sorted = tour.order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..matrix.size()).collect::<Vec<_>>());
    }

    /// Property: summing the returned cycle reproduces the reported cost.
    #[test]
    fn reported_cost_matches_cycle((matrix, start) in problem_strategy(8)) {
        let tour = HeldKarpSolver::new().solve(&matrix, start).expect("solvable");
        prop_assert!(costs_match(tour.cycle_cost(&matrix), tour.total_cost));
    }

    /// Property: reversing an optimal tour on a symmetric matrix keeps its cost.
    #[test]
    fn symmetric_reversal_keeps_cost((matrix, start) in symmetric_problem_strategy(8)) {
        let tour = HeldKarpSolver::new().solve(&matrix, start).expect("solvable");
        let reversed = tour.reversed(&matrix);
        prop_assert_eq!(reversed.start(), Some(start));
        prop_assert!(costs_match(reversed.total_cost, tour.total_cost));
    }

    /// Property: the solver is a pure function of its inputs.
    #[test]
    fn repeated_solves_are_identical((matrix, start) in problem_strategy(8)) {
        let solver = HeldKarpSolver::new();
        let first = solver.solve(&matrix, start).expect("solvable");
        let second = solver.solve(&matrix, start).expect("solvable");
        prop_assert_eq!(first, second);
    }
}
