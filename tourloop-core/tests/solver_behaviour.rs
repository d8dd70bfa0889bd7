//! Tests for the `Solver` trait contract using the identity solver.

use rstest::rstest;
use tourloop_core::{
    CostMatrix, InvalidInputError, SolveError, Solver, test_support::IdentitySolver,
};

fn matrix() -> CostMatrix {
    CostMatrix::from_rows(vec![
        vec![0.0, 4.0, 9.0],
        vec![4.0, 0.0, 2.0],
        vec![9.0, 2.0, 0.0],
    ])
    .expect("valid matrix")
}

#[rstest]
#[case(0, vec![0, 1, 2])]
#[case(2, vec![2, 0, 1])]
fn tour_starts_at_requested_anchor(#[case] start: usize, #[case] expected: Vec<usize>) {
    let tour = IdentitySolver.solve(&matrix(), start).expect("tour");
    assert_eq!(tour.order, expected);
    assert_eq!(tour.total_cost, 15.0);
}

#[rstest]
fn out_of_range_start_is_invalid_input() {
    let err = IdentitySolver.solve(&matrix(), 3).expect_err("bad start");
    assert_eq!(
        err,
        SolveError::InvalidInput(InvalidInputError::StartOutOfRange {
            start: 3,
            locations: 3
        })
    );
}

#[rstest]
fn solvers_are_usable_as_trait_objects() {
    let solver: Box<dyn Solver> = Box::new(IdentitySolver);
    assert!(solver.solve(&matrix(), 1).is_ok());
}
