//! Validates cost matrix construction and optimal assignment solving
//!
//! Solver optimality is checked against exhaustive permutation search on
//! small matrices, which is feasible up to 6x6.

use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tileswap::MosaicError;
use tileswap::algorithm::{assignment, cost};
use tileswap::configuration::DEFAULT_SEED;

fn all_permutations(size: usize) -> Vec<Vec<usize>> {
    let mut current: Vec<usize> = (0..size).collect();
    let mut result = Vec::new();
    permute(&mut current, 0, &mut result);
    result
}

fn permute(current: &mut Vec<usize>, start: usize, result: &mut Vec<Vec<usize>>) {
    if start == current.len() {
        result.push(current.clone());
        return;
    }
    for index in start..current.len() {
        current.swap(start, index);
        permute(current, start + 1, result);
        current.swap(start, index);
    }
}

fn brute_force_minimum(matrix: &Array2<f64>) -> f64 {
    all_permutations(matrix.nrows())
        .iter()
        .map(|permutation| assignment::assignment_cost(matrix, permutation))
        .fold(f64::INFINITY, f64::min)
}

fn random_matrix(size: usize, rng: &mut StdRng) -> Array2<f64> {
    Array2::from_shape_fn((size, size), |_| rng.random::<f64>() * 100.0)
}

#[test]
fn test_solver_matches_brute_force_on_small_matrices() {
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    for size in 1..=6 {
        for _ in 0..4 {
            let matrix = random_matrix(size, &mut rng);
            let permutation = assignment::solve(&matrix).unwrap();
            let total = assignment::assignment_cost(&matrix, &permutation);
            let minimum = brute_force_minimum(&matrix);
            assert!(
                (total - minimum).abs() < 1e-9,
                "solver returned {total} but the exhaustive minimum is {minimum} for size {size}"
            );
        }
    }
}

#[test]
fn test_assignment_is_a_bijection() {
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    let matrix = random_matrix(8, &mut rng);

    let mut permutation = assignment::solve(&matrix).unwrap();
    permutation.sort_unstable();
    assert_eq!(
        permutation,
        (0..8).collect::<Vec<usize>>(),
        "every column must be used exactly once"
    );
}

#[test]
fn test_transposed_matrix_yields_same_total_cost() {
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    let matrix = random_matrix(7, &mut rng);
    let transposed = matrix.t().to_owned();

    let forward = assignment::assignment_cost(&matrix, &assignment::solve(&matrix).unwrap());
    let backward =
        assignment::assignment_cost(&transposed, &assignment::solve(&transposed).unwrap());
    assert!(
        (forward - backward).abs() < 1e-9,
        "swapping the roles of the two tile sets must not change the optimum"
    );
}

#[test]
fn test_zero_matrix_solves_at_zero_cost() {
    let matrix = Array2::<f64>::zeros((4, 4));
    let permutation = assignment::solve(&matrix).unwrap();
    assert!(assignment::assignment_cost(&matrix, &permutation).abs() < 1e-12);
}

#[test]
fn test_empty_matrix_solves_trivially() {
    let matrix = Array2::<f64>::zeros((0, 0));
    assert!(assignment::solve(&matrix).unwrap().is_empty());
}

#[test]
fn test_non_square_matrix_rejected() {
    let matrix = Array2::<f64>::zeros((2, 3));
    assert!(
        matches!(
            assignment::solve(&matrix),
            Err(MosaicError::InfeasibleInput { .. })
        ),
        "a rectangular matrix must fail with InfeasibleInput"
    );
}

#[test]
fn test_non_finite_entry_rejected() {
    let mut matrix = Array2::<f64>::zeros((3, 3));
    matrix[(1, 1)] = f64::NAN;
    assert!(matches!(
        assignment::solve(&matrix),
        Err(MosaicError::InfeasibleInput { .. })
    ));

    matrix[(1, 1)] = f64::INFINITY;
    assert!(matches!(
        assignment::solve(&matrix),
        Err(MosaicError::InfeasibleInput { .. })
    ));
}

#[test]
fn test_cost_matrix_entries_are_pairwise_distances() {
    let features_a = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
    let features_b = [[0.0, 3.0, 4.0], [1.0, 0.0, 0.0]];

    let matrix = cost::build_cost_matrix(&features_a, &features_b).unwrap();
    assert_eq!(matrix.dim(), (2, 2));
    assert!((matrix[(0, 0)] - 5.0).abs() < 1e-12);
    assert!(matrix[(1, 1)].abs() < 1e-12);
    assert!((matrix[(0, 1)] - 1.0).abs() < 1e-12);
}

#[test]
fn test_cost_matrix_requires_equal_set_sizes() {
    let features_a = [[0.0, 0.0, 0.0]];
    let features_b = [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
    assert!(
        matches!(
            cost::build_cost_matrix(&features_a, &features_b),
            Err(MosaicError::DimensionMismatch { .. })
        ),
        "unequal tile sets must fail before any distance is computed"
    );
}

#[test]
fn test_surplus_reds_pair_with_surplus_blues() {
    let red = [255.0, 0.0, 0.0];
    let blue = [0.0, 0.0, 255.0];
    let cross_distance = 255.0 * std::f64::consts::SQRT_2;

    // Three reds and one blue against one red and three blues: one red and
    // one blue pair off at zero cost, the two surplus reds must cross over
    let features_a = [red, red, red, blue];
    let features_b = [blue, blue, blue, red];

    let matrix = cost::build_cost_matrix(&features_a, &features_b).unwrap();
    let permutation = assignment::solve(&matrix).unwrap();
    let total = assignment::assignment_cost(&matrix, &permutation);

    assert!(
        (total - 2.0 * cross_distance).abs() < 1e-6,
        "two cross pairs at distance {cross_distance} expected, got total {total}"
    );

    let cross_pairs = permutation
        .iter()
        .enumerate()
        .filter(|&(row, &col)| matrix[(row, col)] > 1.0)
        .count();
    assert_eq!(cross_pairs, 2, "exactly two red tiles must pair with blues");
}
