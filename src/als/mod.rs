pub mod factors;
pub mod objective;
pub mod solver;
pub mod update_rules;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports for convenience
pub use factors::{initialize, ColFactors, Reconstruction, RowFactors};
pub use objective::{observed_rmse, observed_squared_error, regularized_loss};
pub use solver::{fit, run, AlsConfig, AlsModel, FactorSolver};
pub use update_rules::{solve_regularized, update_column_factors, update_row_factors};
