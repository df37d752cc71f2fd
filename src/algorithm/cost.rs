//! Dense pairwise cost matrix construction
//!
//! Entry (i, j) of the matrix is the distance between feature i of set A
//! and feature j of set B, in whichever colour space the features were
//! extracted. All N² pairs are evaluated; no sparsity is exploited, so
//! memory is O(N²) in the tile count.

use ndarray::Array2;

use crate::analysis::colorspace;
use crate::error::{Result, dimension_mismatch};

/// Build the N×N Euclidean distance matrix between two feature sets
///
/// Rows index set A, columns index set B, both in the canonical row-major
/// tile order.
///
/// # Errors
///
/// Returns a `DimensionMismatch` error when the two sets differ in length;
/// tile swapping requires equal tile counts.
pub fn build_cost_matrix(
    features_a: &[[f64; 3]],
    features_b: &[[f64; 3]],
) -> Result<Array2<f64>> {
    if features_a.len() != features_b.len() {
        return Err(dimension_mismatch(
            &features_a.len(),
            &features_b.len(),
            "cost matrix construction",
        ));
    }

    let size = features_a.len();
    Ok(Array2::from_shape_fn((size, size), |(i, j)| {
        let a = features_a.get(i).copied().unwrap_or([0.0; 3]);
        let b = features_b.get(j).copied().unwrap_or([0.0; 3]);
        colorspace::distance(&a, &b)
    }))
}
