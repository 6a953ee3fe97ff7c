use ndarray::Array2;

use crate::ratings::RatingMatrix;

use super::factors::{ColFactors, RowFactors};

/// Σ over observed cells of (r_ij − u_i·v_j)²
pub fn observed_squared_error(ratings: &RatingMatrix, u: &RowFactors, v: &ColFactors) -> f64 {
    ratings
        .observed()
        .map(|((i, j), r)| {
            let diff = r - u.row(i).dot(&v.row(j));
            diff * diff
        })
        .sum()
}

/// ALS objective: squared error on observed cells + λ(‖U‖²_F + ‖V‖²_F).
///
/// Each half-step of ALS minimizes this exactly in one factor, so it never
/// increases across updates.
pub fn regularized_loss(ratings: &RatingMatrix, u: &RowFactors, v: &ColFactors, lambda: f64) -> f64 {
    observed_squared_error(ratings, u, v) + lambda * (frobenius_sq(u) + frobenius_sq(v))
}

/// Root mean squared error over observed cells, `None` if nothing is observed
pub fn observed_rmse(ratings: &RatingMatrix, u: &RowFactors, v: &ColFactors) -> Option<f64> {
    let n = ratings.n_observed();
    if n == 0 {
        return None;
    }
    Some((observed_squared_error(ratings, u, v) / n as f64).sqrt())
}

fn frobenius_sq(a: &Array2<f64>) -> f64 {
    a.iter().map(|x| x * x).sum()
}
