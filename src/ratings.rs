//! Partially observed rating grids and their observation masks.

use std::ops::Index;

use ndarray::{Array2, Axis};

use crate::error::AlsError;

/// An `R × C` grid of optional ratings. `None` marks an unknown entry.
///
/// Observed values are always finite. The grid is read-only once built.
///
/// # Example
/// ```
/// use fast_als::ratings::RatingMatrix;
/// let r = RatingMatrix::from_rows(vec![
///     vec![Some(5.0), None],
///     vec![None, Some(1.0)],
/// ])
/// .unwrap();
/// assert_eq!(r.get(0, 0), Some(5.0));
/// assert_eq!(r.get(0, 1), None);
/// assert_eq!(r.n_observed(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix {
    values: Array2<Option<f64>>,
    rows: usize,
    cols: usize,
}

impl RatingMatrix {
    pub fn new(values: Array2<Option<f64>>) -> Result<Self, AlsError> {
        for ((row, col), value) in values.indexed_iter() {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(AlsError::NonFiniteRating { row, col });
                }
            }
        }
        let (rows, cols) = values.dim();
        Ok(RatingMatrix { values, rows, cols })
    }

    /// Build from nested rows, e.g. a literal grid in source code
    pub fn from_rows(grid: Vec<Vec<Option<f64>>>) -> Result<Self, AlsError> {
        let rows = grid.len();
        let cols = grid.first().map(|r| r.len()).unwrap_or(0);
        for (row, entries) in grid.iter().enumerate() {
            if entries.len() != cols {
                return Err(AlsError::RaggedRows {
                    row,
                    expected: cols,
                    found: entries.len(),
                });
            }
        }
        let values = Array2::from_shape_fn((rows, cols), |(i, j)| grid[i][j]);
        Self::new(values)
    }

    /// Build from a dense array where NaN marks a missing rating
    pub fn from_nan_array(values: &Array2<f64>) -> Result<Self, AlsError> {
        let mapped = values.mapv(|v| if v.is_nan() { None } else { Some(v) });
        Self::new(mapped)
    }

    /// Rating at `(row, col)`; `None` when missing or out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied().flatten()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn values(&self) -> &Array2<Option<f64>> {
        &self.values
    }

    pub fn n_observed(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Iterate over `((row, col), rating)` for every observed cell
    pub fn observed(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.values
            .indexed_iter()
            .filter_map(|(idx, v)| v.map(|r| (idx, r)))
    }

    pub fn mask(&self) -> ObservationMask {
        ObservationMask::from_ratings(self)
    }
}

impl Index<(usize, usize)> for RatingMatrix {
    type Output = Option<f64>;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.values[index]
    }
}

/// Boolean grid, `true` exactly where the source [`RatingMatrix`] holds a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationMask {
    mask: Array2<bool>,
}

impl ObservationMask {
    pub fn from_ratings(ratings: &RatingMatrix) -> Self {
        ObservationMask {
            mask: ratings.values.mapv(|v| v.is_some()),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.mask.dim()
    }

    pub fn is_observed(&self, row: usize, col: usize) -> bool {
        self.mask.get((row, col)).copied().unwrap_or(false)
    }

    /// Column indices observed in `row`
    pub fn observed_in_row(&self, row: usize) -> Vec<usize> {
        observed_indices(self.mask.index_axis(Axis(0), row).iter())
    }

    /// Row indices observed in `col`
    pub fn observed_in_column(&self, col: usize) -> Vec<usize> {
        observed_indices(self.mask.index_axis(Axis(1), col).iter())
    }

    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    pub fn as_array(&self) -> &Array2<bool> {
        &self.mask
    }
}

fn observed_indices<'a>(flags: impl Iterator<Item = &'a bool>) -> Vec<usize> {
    flags
        .enumerate()
        .filter(|(_, &m)| m)
        .map(|(idx, _)| idx)
        .collect()
}
