//! Latent-factor completion of partially observed rating matrices with
//! regularized Alternating Least Squares.
//!
//! ```
//! use fast_als::als::run;
//! use fast_als::ratings::RatingMatrix;
//!
//! let ratings = RatingMatrix::from_rows(vec![
//!     vec![Some(5.0), None, Some(3.0)],
//!     vec![Some(4.0), Some(2.0), None],
//!     vec![None, Some(1.0), Some(4.0)],
//! ])
//! .unwrap();
//! let reconstruction = run(&ratings, 2, 0.1, 2, 42).unwrap();
//! assert_eq!(reconstruction.dim(), (3, 3));
//! ```
pub mod als;
pub mod config;
pub mod error;
pub mod ratings;
pub mod util;

pub use als::{run, AlsConfig, AlsModel, FactorSolver};
pub use error::{AlsError, FactorAxis};
pub use ratings::{ObservationMask, RatingMatrix};
