//! Error taxonomy for the ALS completion engine.

use std::error::Error;
use std::fmt;

/// Which side of the factorization a solve belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorAxis {
    Row,
    Column,
}

impl fmt::Display for FactorAxis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FactorAxis::Row => write!(f, "row"),
            FactorAxis::Column => write!(f, "column"),
        }
    }
}

/// Errors raised while building inputs or running ALS.
///
/// Every variant is terminal for the current run; nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum AlsError {
    /// `rows`, `cols` or `k` is zero
    InvalidDimension { rows: usize, cols: usize, k: usize },
    /// The k×k normal matrix for one row/column could not be inverted
    SingularSystem { axis: FactorAxis, index: usize },
    /// Regularization strength is negative, NaN or infinite
    InvalidRegularization(f64),
    /// Two matrices that must agree in shape do not
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A row of a nested rating grid has the wrong length
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// An observed rating is infinite
    NonFiniteRating { row: usize, col: usize },
}

impl fmt::Display for AlsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlsError::InvalidDimension { rows, cols, k } => write!(
                f,
                "Invalid dimension: rows={}, cols={}, k={} (all must be positive)",
                rows, cols, k
            ),
            AlsError::SingularSystem { axis, index } => write!(
                f,
                "Singular normal equations while updating {} {}",
                axis, index
            ),
            AlsError::InvalidRegularization(lambda) => write!(
                f,
                "Invalid regularization: lambda={} (must be finite and >= 0)",
                lambda
            ),
            AlsError::ShapeMismatch { expected, found } => write!(
                f,
                "Shape mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            AlsError::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "Ragged rating rows: row {} has {} entries, expected {}",
                row, found, expected
            ),
            AlsError::NonFiniteRating { row, col } => {
                write!(f, "Non-finite rating at ({}, {})", row, col)
            }
        }
    }
}

impl Error for AlsError {}
