use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::AlsError;
use crate::ratings::{ObservationMask, RatingMatrix};

use super::factors::{initialize, ColFactors, Reconstruction, RowFactors};
use super::objective::{observed_rmse, regularized_loss};
use super::update_rules::{update_column_factors, update_row_factors, validate_lambda};

/// Parameters of one ALS run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlsConfig {
    /// Latent dimensionality
    pub k: usize,
    /// L2 regularization strength, λ ≥ 0
    pub lambda: f64,
    /// Number of outer {columns, rows} passes
    pub iterations: usize,
    /// Seed for the initial factors
    pub seed: u64,
}

impl Default for AlsConfig {
    fn default() -> Self {
        Self {
            k: 2,
            lambda: 0.1,
            iterations: 2,
            seed: 42,
        }
    }
}

impl AlsConfig {
    /// Check λ. Dimensions are checked against the data by [`initialize`].
    pub fn validate(&self) -> Result<(), AlsError> {
        validate_lambda(self.lambda)
    }
}

/// Owns `U` and `V` for the length of one run and refines them in place.
pub struct FactorSolver<'a> {
    ratings: &'a RatingMatrix,
    mask: ObservationMask,
    u: RowFactors,
    v: ColFactors,
    lambda: f64,
    iterations_done: usize,
}

impl<'a> FactorSolver<'a> {
    pub fn new(ratings: &'a RatingMatrix, config: &AlsConfig) -> Result<Self, AlsError> {
        config.validate()?;
        let (u, v) = initialize(ratings.rows(), ratings.cols(), config.k, config.seed)?;
        Ok(Self {
            ratings,
            mask: ratings.mask(),
            u,
            v,
            lambda: config.lambda,
            iterations_done: 0,
        })
    }

    /// One outer iteration: all columns first, then all rows
    pub fn step(&mut self) -> Result<(), AlsError> {
        update_column_factors(self.ratings, &self.mask, &self.u, &mut self.v, self.lambda)?;
        update_row_factors(self.ratings, &self.mask, &self.v, &mut self.u, self.lambda)?;
        self.iterations_done += 1;
        Ok(())
    }

    pub fn iterations_done(&self) -> usize {
        self.iterations_done
    }

    pub fn objective(&self) -> f64 {
        regularized_loss(self.ratings, &self.u, &self.v, self.lambda)
    }

    pub fn rmse(&self) -> Option<f64> {
        observed_rmse(self.ratings, &self.u, &self.v)
    }

    pub fn row_factors(&self) -> &RowFactors {
        &self.u
    }

    pub fn col_factors(&self) -> &ColFactors {
        &self.v
    }

    pub fn into_model(self) -> AlsModel {
        AlsModel {
            row_factors: self.u,
            col_factors: self.v,
        }
    }
}

/// Trained factors: ratings ≈ U · Vᵗ
#[derive(Debug, Clone, PartialEq)]
pub struct AlsModel {
    pub row_factors: RowFactors,
    pub col_factors: ColFactors,
}

impl AlsModel {
    pub fn shape(&self) -> (usize, usize) {
        (self.row_factors.nrows(), self.col_factors.nrows())
    }

    /// `dot(U[row], V[col])`, `None` out of bounds
    pub fn predict(&self, row: usize, col: usize) -> Option<f64> {
        let (rows, cols) = self.shape();
        if row >= rows || col >= cols {
            return None;
        }
        Some(self.row_factors.row(row).dot(&self.col_factors.row(col)))
    }

    pub fn reconstruct(&self) -> Reconstruction {
        Array2::from_shape_fn(self.shape(), |(i, j)| {
            self.row_factors.row(i).dot(&self.col_factors.row(j))
        })
    }

    /// Observed ratings kept as-is, missing cells filled with predictions
    pub fn complete(&self, ratings: &RatingMatrix) -> Result<Array2<f64>, AlsError> {
        if ratings.shape() != self.shape() {
            return Err(AlsError::ShapeMismatch {
                expected: self.shape(),
                found: ratings.shape(),
            });
        }
        let predicted = self.reconstruct();
        Ok(Array2::from_shape_fn(self.shape(), |(i, j)| {
            ratings.get(i, j).unwrap_or(predicted[[i, j]])
        }))
    }
}

/// Initialize, run `config.iterations` passes and hand back the factors
pub fn fit(ratings: &RatingMatrix, config: &AlsConfig) -> Result<AlsModel, AlsError> {
    let mut solver = FactorSolver::new(ratings, config)?;
    for _ in 0..config.iterations {
        solver.step()?;
    }
    Ok(solver.into_model())
}

/// Complete `ratings` with a rank-`k` ALS factorization and return `U · Vᵗ`.
///
/// Performs no I/O; presentation is left to the caller.
pub fn run(
    ratings: &RatingMatrix,
    k: usize,
    lambda: f64,
    iterations: usize,
    seed: u64,
) -> Result<Reconstruction, AlsError> {
    let config = AlsConfig {
        k,
        lambda,
        iterations,
        seed,
    };
    Ok(fit(ratings, &config)?.reconstruct())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::als::test_utils::{assert_close, reference_ratings, REFERENCE_RECONSTRUCTION};

    #[test]
    fn test_default_config_matches_reference_run() {
        let config = AlsConfig::default();
        assert_eq!(config.k, 2);
        assert_eq!(config.lambda, 0.1);
        assert_eq!(config.iterations, 2);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = AlsConfig {
            k: 4,
            lambda: 0.25,
            iterations: 10,
            seed: 7,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"k":4,"lambda":0.25,"iterations":10,"seed":7}"#);
        assert_eq!(serde_json::from_str::<AlsConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_run_reference_reconstruction() {
        let ratings = reference_ratings();
        let r = run(&ratings, 2, 0.1, 2, 42).unwrap();
        assert_close(&r, &REFERENCE_RECONSTRUCTION, 1e-9);
    }

    #[test]
    fn test_step_counts_iterations() {
        let ratings = reference_ratings();
        let mut solver = FactorSolver::new(&ratings, &AlsConfig::default()).unwrap();
        assert_eq!(solver.iterations_done(), 0);
        solver.step().unwrap();
        solver.step().unwrap();
        assert_eq!(solver.iterations_done(), 2);
    }

    #[test]
    fn test_loss_never_increases() {
        let ratings = reference_ratings();
        let mask = ratings.mask();
        let lambda = 0.1;
        let (mut u, mut v) = initialize(3, 3, 2, 7).unwrap();
        let mut prev = regularized_loss(&ratings, &u, &v, lambda);

        for _ in 0..10 {
            update_column_factors(&ratings, &mask, &u, &mut v, lambda).unwrap();
            let after_cols = regularized_loss(&ratings, &u, &v, lambda);
            assert!(after_cols <= prev + 1e-12, "{} > {}", after_cols, prev);

            update_row_factors(&ratings, &mask, &v, &mut u, lambda).unwrap();
            let after_rows = regularized_loss(&ratings, &u, &v, lambda);
            assert!(after_rows <= after_cols + 1e-12, "{} > {}", after_rows, after_cols);
            prev = after_rows;
        }
    }

    #[test]
    fn test_zero_iterations_is_initial_product() {
        let ratings = reference_ratings();
        let r = run(&ratings, 2, 0.1, 0, 42).unwrap();
        let (u, v) = initialize(3, 3, 2, 42).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(r[[i, j]], u.row(i).dot(&v.row(j)));
            }
        }
    }

    #[test]
    fn test_reconstruction_is_rowwise_dot() {
        let ratings = reference_ratings();
        let model = fit(&ratings, &AlsConfig::default()).unwrap();
        let r = model.reconstruct();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(
                    r[[i, j]],
                    model.row_factors.row(i).dot(&model.col_factors.row(j))
                );
                assert_eq!(model.predict(i, j), Some(r[[i, j]]));
            }
        }
        assert_eq!(model.predict(3, 0), None);
    }

    #[test]
    fn test_complete_keeps_observed_ratings() {
        let ratings = reference_ratings();
        let model = fit(&ratings, &AlsConfig::default()).unwrap();
        let completed = model.complete(&ratings).unwrap();
        let predicted = model.reconstruct();
        for i in 0..3 {
            for j in 0..3 {
                match ratings.get(i, j) {
                    Some(r) => assert_eq!(completed[[i, j]], r),
                    None => assert_eq!(completed[[i, j]], predicted[[i, j]]),
                }
            }
        }
    }

    #[test]
    fn test_complete_rejects_other_shapes() {
        let ratings = reference_ratings();
        let model = fit(&ratings, &AlsConfig::default()).unwrap();
        let other = RatingMatrix::from_rows(vec![vec![Some(1.0)]]).unwrap();
        assert!(matches!(
            model.complete(&other),
            Err(AlsError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_solver_rejects_bad_config() {
        let ratings = reference_ratings();
        let config = AlsConfig {
            lambda: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            FactorSolver::new(&ratings, &config),
            Err(AlsError::InvalidRegularization(_))
        ));
        let config = AlsConfig {
            k: 0,
            ..Default::default()
        };
        assert!(matches!(
            FactorSolver::new(&ratings, &config),
            Err(AlsError::InvalidDimension { k: 0, .. })
        ));
    }
}
