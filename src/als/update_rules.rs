use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{AlsError, FactorAxis};
use crate::ratings::{ObservationMask, RatingMatrix};
use crate::util::{clone_to_dmatrix, clone_to_dvector, dvector_to_array1};

use super::factors::{ColFactors, RowFactors};

/// Without regularization, pivots smaller than this fraction of the largest
/// pivot count as zero
const PIVOT_RTOL: f64 = 1e-12;

/// Re-solve every column vector of `V` with `U` held fixed.
///
/// For column j with observed rows `idx`:
///   (U_idxᵗ U_idx + λI) v_j = U_idxᵗ r_idx
/// Columns without observations keep their current vector.
pub fn update_column_factors(
    ratings: &RatingMatrix,
    mask: &ObservationMask,
    row_factors: &RowFactors,
    col_factors: &mut ColFactors,
    lambda: f64,
) -> Result<(), AlsError> {
    validate_lambda(lambda)?;
    check_shapes(ratings, mask, row_factors, col_factors)?;

    solve_each(
        FactorAxis::Column,
        row_factors,
        col_factors,
        lambda,
        |j| {
            mask.observed_in_column(j)
                .into_iter()
                .filter_map(|i| ratings.get(i, j).map(|r| (i, r)))
                .collect()
        },
    )
}

/// Re-solve every row vector of `U` with `V` held fixed.
///
/// For row i with observed columns `idx`:
///   (V_idxᵗ V_idx + λI) u_i = V_idxᵗ r_idx
/// Rows without observations keep their current vector.
pub fn update_row_factors(
    ratings: &RatingMatrix,
    mask: &ObservationMask,
    col_factors: &ColFactors,
    row_factors: &mut RowFactors,
    lambda: f64,
) -> Result<(), AlsError> {
    validate_lambda(lambda)?;
    check_shapes(ratings, mask, row_factors, col_factors)?;

    solve_each(FactorAxis::Row, col_factors, row_factors, lambda, |i| {
        mask.observed_in_row(i)
            .into_iter()
            .filter_map(|j| ratings.get(i, j).map(|r| (j, r)))
            .collect()
    })
}

/// Overwrite each row of `target` with its regularized least-squares fit
/// against the rows of `fixed` selected by `observed`.
fn solve_each<F>(
    axis: FactorAxis,
    fixed: &Array2<f64>,
    target: &mut Array2<f64>,
    lambda: f64,
    observed: F,
) -> Result<(), AlsError>
where
    F: Fn(usize) -> Vec<(usize, f64)>,
{
    for index in 0..target.nrows() {
        let pairs = observed(index);
        if pairs.is_empty() {
            continue;
        }
        let idx: Vec<usize> = pairs.iter().map(|&(i, _)| i).collect();
        let r: Array1<f64> = pairs.iter().map(|&(_, v)| v).collect();
        let sub = fixed.select(Axis(0), &idx);

        let solved = solve_regularized(sub.view(), r.view(), lambda)
            .ok_or(AlsError::SingularSystem { axis, index })?;
        target.row_mut(index).assign(&solved);
    }
    Ok(())
}

/// Solve `(AᵗA + λI) x = Aᵗb`.
///
/// With `λ > 0` the normal matrix is positive definite and is solved by
/// Cholesky, whatever the scale of `A` relative to `λ`. With `λ = 0` it is
/// solved by LU with partial pivoting and `None` is returned when it is
/// rank deficient, including pivots that vanish relative to the largest one.
pub fn solve_regularized(
    a: ArrayView2<f64>,
    b: ArrayView1<f64>,
    lambda: f64,
) -> Option<Array1<f64>> {
    let a = clone_to_dmatrix(a);
    let b = clone_to_dvector(b);
    let k = a.ncols();

    let mut normal: DMatrix<f64> = a.tr_mul(&a);
    for d in 0..k {
        normal[(d, d)] += lambda;
    }
    let rhs = a.tr_mul(&b);

    if lambda > 0.0 {
        return match normal.clone().cholesky() {
            Some(chol) => Some(dvector_to_array1(&chol.solve(&rhs))),
            // rounding can cost definiteness when λ is far below ‖AᵗA‖
            None => normal.lu().solve(&rhs).map(|x| dvector_to_array1(&x)),
        };
    }

    let lu = normal.lu();
    let pivots = lu.u().diagonal();
    let largest = pivots.iter().fold(0.0_f64, |m, p| m.max(p.abs()));
    let cutoff = PIVOT_RTOL * largest;
    if largest == 0.0 || pivots.iter().any(|p| p.abs() <= cutoff) {
        return None;
    }

    lu.solve(&rhs).map(|x| dvector_to_array1(&x))
}

pub(crate) fn validate_lambda(lambda: f64) -> Result<(), AlsError> {
    if lambda.is_finite() && lambda >= 0.0 {
        Ok(())
    } else {
        Err(AlsError::InvalidRegularization(lambda))
    }
}

fn check_shapes(
    ratings: &RatingMatrix,
    mask: &ObservationMask,
    row_factors: &RowFactors,
    col_factors: &ColFactors,
) -> Result<(), AlsError> {
    expect_shape(ratings.shape(), mask.shape())?;
    let k = row_factors.ncols();
    expect_shape((ratings.rows(), k), row_factors.dim())?;
    expect_shape((ratings.cols(), k), col_factors.dim())
}

fn expect_shape(expected: (usize, usize), found: (usize, usize)) -> Result<(), AlsError> {
    if expected == found {
        Ok(())
    } else {
        Err(AlsError::ShapeMismatch { expected, found })
    }
}
