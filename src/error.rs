//! Error types for tiling and matching operations
//!
//! Every failure in this crate stems from a caller contract violation and is
//! detected before any heavy computation begins. There is no recoverable or
//! retryable error class: compositing clips instead of failing, and feature
//! extraction substitutes a sentinel colour instead of failing.

use std::fmt;

/// Main error type for all tiling and matching operations
#[derive(Debug)]
pub enum MosaicError {
    /// Tile grid parameters produce no usable tiles
    InvalidGrid {
        /// Requested horizontal tile count
        x_count: u32,
        /// Requested vertical tile count
        y_count: u32,
        /// Explanation of why the grid is degenerate
        reason: String,
    },

    /// Two collections that must agree in size do not
    DimensionMismatch {
        /// Size description of the left-hand operand
        left: String,
        /// Size description of the right-hand operand
        right: String,
        /// Operation that required the sizes to agree
        context: &'static str,
    },

    /// Cost matrix cannot be fed to the assignment solver
    InfeasibleInput {
        /// Matrix row count
        rows: usize,
        /// Matrix column count
        cols: usize,
        /// Explanation of the infeasibility
        reason: String,
    },

    /// Numerical computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid {
                x_count,
                y_count,
                reason,
            } => {
                write!(f, "Invalid {x_count}x{y_count} tile grid: {reason}")
            }
            Self::DimensionMismatch {
                left,
                right,
                context,
            } => {
                write!(f, "Dimension mismatch during {context}: {left} vs {right}")
            }
            Self::InfeasibleInput { rows, cols, reason } => {
                write!(f, "Infeasible {rows}x{cols} cost matrix: {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {}

/// Convenience type alias for tiling and matching results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Create an invalid grid error
pub fn invalid_grid(x_count: u32, y_count: u32, reason: &impl ToString) -> MosaicError {
    MosaicError::InvalidGrid {
        x_count,
        y_count,
        reason: reason.to_string(),
    }
}

/// Create a dimension mismatch error
pub fn dimension_mismatch(
    left: &impl ToString,
    right: &impl ToString,
    context: &'static str,
) -> MosaicError {
    MosaicError::DimensionMismatch {
        left: left.to_string(),
        right: right.to_string(),
        context,
    }
}

/// Create an infeasible input error
pub fn infeasible_input(rows: usize, cols: usize, reason: &impl ToString) -> MosaicError {
    MosaicError::InfeasibleInput {
        rows,
        cols,
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> MosaicError {
    MosaicError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
