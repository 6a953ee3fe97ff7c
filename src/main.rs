/*
 * File: /main.rs
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
use std::time::Instant;

use chrono::Local;
use log::{info, LevelFilter};

use fast_als::als::FactorSolver;
use fast_als::config::Config;
use fast_als::ratings::RatingMatrix;
use ndarray::Array2;

fn setup_logger() -> Result<(), log::SetLoggerError> {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Observed ratings in brackets, predictions bare
fn render_table(ratings: &RatingMatrix, completed: &Array2<f64>) -> String {
    let mut out = String::new();
    out.push_str("      ");
    for j in 0..ratings.cols() {
        out.push_str(&format!("{:>9}", format!("col {}", j)));
    }
    out.push('\n');
    for i in 0..ratings.rows() {
        out.push_str(&format!("row {:<2}", i));
        for j in 0..ratings.cols() {
            let cell = match ratings.get(i, j) {
                Some(r) => format!("[{:.1}]", r),
                None => format!("{:.2}", completed[[i, j]]),
            };
            out.push_str(&format!("{:>9}", cell));
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logger()?;
    let config = Config::new(std::env::args())?;
    let ratings = config.get_ratings();
    let als = config.get_als();

    info!(
        "[{}] Ratings: {} ({}x{}, {} observed)",
        timestamp(),
        config.get_source(),
        ratings.rows(),
        ratings.cols(),
        ratings.n_observed()
    );
    info!("[{}] ALS config: {}", timestamp(), serde_json::to_string(als)?);

    let start_time = Instant::now();
    let mut solver = FactorSolver::new(ratings, als)?;
    info!(
        "[{}] init: loss={:.6} rmse={:.6}",
        timestamp(),
        solver.objective(),
        solver.rmse().unwrap_or(f64::NAN)
    );
    for _ in 0..als.iterations {
        solver.step()?;
        info!(
            "[{}] iteration {}: loss={:.6} rmse={:.6}",
            timestamp(),
            solver.iterations_done(),
            solver.objective(),
            solver.rmse().unwrap_or(f64::NAN)
        );
    }
    let model = solver.into_model();
    let completed = model.complete(ratings)?;
    info!("[{}] Done in {:?}", timestamp(), start_time.elapsed());

    print!("{}", render_table(ratings, &completed));
    Ok(())
}
