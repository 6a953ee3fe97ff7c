use ndarray::Array2;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use crate::error::AlsError;

/// Latent vectors for the row entities, shape `rows × k`
pub type RowFactors = Array2<f64>;

/// Latent vectors for the column entities, shape `cols × k`
pub type ColFactors = Array2<f64>;

/// Dense `rows × cols` prediction grid, `U · Vᵗ`
pub type Reconstruction = Array2<f64>;

/// Draw the starting factor matrices from `Uniform[0, 1)`.
///
/// A single `StdRng` is seeded from `seed` and lives only for this call.
/// `U` is filled first, then `V`, both in row-major order, so the same
/// `(rows, cols, k, seed)` always yields bit-identical matrices.
pub fn initialize(
    rows: usize,
    cols: usize,
    k: usize,
    seed: u64,
) -> Result<(RowFactors, ColFactors), AlsError> {
    if rows == 0 || cols == 0 || k == 0 {
        return Err(AlsError::InvalidDimension { rows, cols, k });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let u = Array2::random_using((rows, k), Uniform::new(0.0, 1.0), &mut rng);
    let v = Array2::random_using((cols, k), Uniform::new(0.0, 1.0), &mut rng);
    Ok((u, v))
}
