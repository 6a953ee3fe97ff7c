/// Shared test utilities for the ALS modules
use ndarray::{Array2, ArrayView1};

use crate::ratings::RatingMatrix;

/// The 3×3 books × users grid of the classic demo (`None` = not rated)
pub fn reference_ratings() -> RatingMatrix {
    crate::config::demo_ratings().unwrap()
}

/// Output of `run(reference_ratings(), k=2, λ=0.1, iterations=2, seed=42)`
pub const REFERENCE_RECONSTRUCTION: [[f64; 3]; 3] = [
    [4.978082281719367, 2.1152033094353295, 3.0042873339696707],
    [4.0317860820938485, 1.8919083624293795, 4.190364969745418],
    [1.7113125586636833, 1.0264631843571874, 3.974555418065755],
];

pub fn assert_close(actual: &Array2<f64>, expected: &[[f64; 3]; 3], tol: f64) {
    assert_eq!(actual.dim(), (3, 3));
    for i in 0..3 {
        for j in 0..3 {
            assert!(
                (actual[[i, j]] - expected[i][j]).abs() < tol,
                "mismatch at ({}, {}): {} vs {}",
                i,
                j,
                actual[[i, j]],
                expected[i][j]
            );
        }
    }
}

pub fn l2_norm(v: ArrayView1<f64>) -> f64 {
    v.dot(&v).sqrt()
}
