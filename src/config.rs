/*
 * File: /config.rs
 * Created Date: Monday October 19th 2026
 * Author: fast_als developers
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: fast_als developers
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */

use std::error::Error;
use std::fs::File;

use ndarray::Array2;
use ndarray_npy::ReadNpyExt;

use crate::als::AlsConfig;
use crate::error::AlsError;
use crate::ratings::RatingMatrix;

/// Command-line configuration for the `fast_als` binary
pub struct Config {
    ratings: RatingMatrix,
    source: String,
    als: AlsConfig,
}

impl Config {
    /// constructor
    ///
    /// All arguments are positional and optional; missing ones fall back to
    /// [`AlsConfig::default`]. A matrix path of `-` (or none) selects the
    /// built-in 3×3 demo grid. `.npy` files are read as `f64`, NaN = unrated.
    ///
    /// # Examples
    /// ```bash
    /// $ cargo run -- data/ratings.npy 2 0.1 2 42
    /// $ cargo run -- - 3 0.5 10
    /// ```
    pub fn new(mut args: impl Iterator<Item = String>) -> Result<Config, Box<dyn Error>> {
        // 0: program name
        // 1: matrix path or "-"
        // 2: k
        // 3: lambda
        // 4: iterations
        // 5: seed
        args.next();
        let defaults = AlsConfig::default();

        let (ratings, source) = match args.next() {
            Some(path) if path != "-" => {
                let reader = File::open(&path)?;
                let dense = Array2::<f64>::read_npy(reader)?;
                (RatingMatrix::from_nan_array(&dense)?, path)
            }
            _ => (demo_ratings()?, "built-in demo".to_string()),
        };

        let k = match args.next() {
            Some(s) => s.parse::<usize>()?,
            None => defaults.k,
        };
        let lambda = match args.next() {
            Some(s) => s.parse::<f64>()?,
            None => defaults.lambda,
        };
        let iterations = match args.next() {
            Some(s) => s.parse::<usize>()?,
            None => defaults.iterations,
        };
        let seed = match args.next() {
            Some(s) => s.parse::<u64>()?,
            None => defaults.seed,
        };

        let als = AlsConfig {
            k,
            lambda,
            iterations,
            seed,
        };
        als.validate()?;

        Ok(Config {
            ratings,
            source,
            als,
        })
    }

    pub fn get_ratings(&self) -> &RatingMatrix {
        &self.ratings
    }

    pub fn get_source(&self) -> &str {
        &self.source
    }

    pub fn get_als(&self) -> &AlsConfig {
        &self.als
    }
}

/// Books × users grid with three unknown ratings
pub fn demo_ratings() -> Result<RatingMatrix, AlsError> {
    RatingMatrix::from_rows(vec![
        vec![Some(5.0), None, Some(3.0)],
        vec![Some(4.0), Some(2.0), None],
        vec![None, Some(1.0), Some(4.0)],
    ])
}
