//! Exact minimum-cost bipartite assignment solver
//!
//! Implements the Hungarian (Kuhn–Munkres) algorithm with row and column
//! potentials and shortest augmenting paths: O(N³) time, O(N²) space. This
//! is the throughput bottleneck of the whole pipeline for large grids.
//!
//! Rows and columns are handled 1-based internally, with column 0 acting
//! as the root of each augmenting path; the virtual entries never carry
//! cost and disappear when the permutation is extracted.

use ndarray::Array2;
use num_traits::{Float, NumAssign};

use crate::error::{Result, computation_error, infeasible_input};

/// Solve the assignment problem for a square cost matrix
///
/// Returns the permutation mapping each row index to its assigned column
/// such that the total cost is minimal over all permutations. With tied
/// costs any optimal permutation may be returned, but the total is always
/// the proven minimum. A solution always exists for a square finite
/// matrix, so apart from input validation this never fails.
///
/// # Errors
///
/// Returns an `InfeasibleInput` error when the matrix is not square or
/// contains non-finite entries.
pub fn solve<F>(cost: &Array2<F>) -> Result<Vec<usize>>
where
    F: Float + NumAssign,
{
    let (rows, cols) = cost.dim();
    if rows != cols {
        return Err(infeasible_input(
            rows,
            cols,
            &"cost matrix must be square",
        ));
    }
    if cost.iter().any(|entry| !entry.is_finite()) {
        return Err(infeasible_input(
            rows,
            cols,
            &"cost matrix contains a non-finite entry",
        ));
    }

    let size = rows;
    if size == 0 {
        return Ok(Vec::new());
    }

    // Index 0 is the virtual root row/column; real indices are 1..=size.
    let mut row_potential = vec![F::zero(); size + 1];
    let mut col_potential = vec![F::zero(); size + 1];
    let mut assigned_row = vec![0usize; size + 1];
    let mut path = vec![0usize; size + 1];

    for row in 1..=size {
        assign(&mut assigned_row, 0, row);
        let mut current_col = 0usize;
        let mut min_reduced = vec![F::infinity(); size + 1];
        let mut visited = vec![false; size + 1];

        // Grow the alternating tree until a free column is reached.
        loop {
            assign(&mut visited, current_col, true);
            let current_row = value(&assigned_row, current_col, 0);
            let mut delta = F::infinity();
            let mut next_col = 0usize;

            for col in 1..=size {
                if value(&visited, col, true) {
                    continue;
                }
                let reduced = value_2d(cost, current_row - 1, col - 1)
                    - value(&row_potential, current_row, F::zero())
                    - value(&col_potential, col, F::zero());
                if reduced < value(&min_reduced, col, F::infinity()) {
                    assign(&mut min_reduced, col, reduced);
                    assign(&mut path, col, current_col);
                }
                if value(&min_reduced, col, F::infinity()) < delta {
                    delta = value(&min_reduced, col, F::infinity());
                    next_col = col;
                }
            }

            if !delta.is_finite() {
                return Err(computation_error(
                    "hungarian augmentation",
                    &"no finite augmenting step exists",
                ));
            }

            for col in 0..=size {
                if value(&visited, col, false) {
                    let owner = value(&assigned_row, col, 0);
                    if let Some(potential) = row_potential.get_mut(owner) {
                        *potential += delta;
                    }
                    if let Some(potential) = col_potential.get_mut(col) {
                        *potential -= delta;
                    }
                } else if let Some(reduced) = min_reduced.get_mut(col) {
                    *reduced -= delta;
                }
            }

            current_col = next_col;
            if value(&assigned_row, current_col, 0) == 0 {
                break;
            }
        }

        // Walk back along the alternating path, flipping assignments.
        while current_col != 0 {
            let previous_col = value(&path, current_col, 0);
            let moved = value(&assigned_row, previous_col, 0);
            assign(&mut assigned_row, current_col, moved);
            current_col = previous_col;
        }
    }

    let mut permutation = vec![0usize; size];
    for col in 1..=size {
        let row = value(&assigned_row, col, 0);
        if row == 0 {
            return Err(computation_error(
                "hungarian extraction",
                &"a column was left unassigned",
            ));
        }
        assign(&mut permutation, row - 1, col - 1);
    }

    Ok(permutation)
}

/// Total cost of a permutation under a cost matrix
///
/// Sums `cost[(i, permutation[i])]` over all rows. Used for diagnostics
/// and for verifying optimality in tests.
pub fn assignment_cost<F>(cost: &Array2<F>, permutation: &[usize]) -> F
where
    F: Float + NumAssign,
{
    let mut total = F::zero();
    for (row, &col) in permutation.iter().enumerate() {
        if let Some(&entry) = cost.get((row, col)) {
            total += entry;
        }
    }
    total
}

fn value<T: Copy>(slice: &[T], index: usize, fallback: T) -> T {
    slice.get(index).copied().unwrap_or(fallback)
}

fn value_2d<F: Float>(matrix: &Array2<F>, row: usize, col: usize) -> F {
    matrix.get((row, col)).copied().unwrap_or_else(F::infinity)
}

fn assign<T>(slice: &mut [T], index: usize, value: T) {
    if let Some(slot) = slice.get_mut(index) {
        *slot = value;
    }
}
