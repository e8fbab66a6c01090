//! Efficiency Metrics Example
//!
//! Scores a simulated hydrograph against observations with the
//! Nash-Sutcliffe family and the Kling-Gupta efficiency.
//!
//! Run with: cargo run --example efficiency

use hydrotools::metrics::{kling_gupta_components, root_mean_squared_error};
use hydrotools::prelude::*;

fn main() {
    println!("=== Efficiency Metrics Example ===\n");

    let observed = vec![12.0, 15.0, 31.0, 58.0, 44.0, 30.0, 22.0, 18.0, 15.0, 13.0];
    let simulated = vec![13.5, 14.0, 26.0, 61.0, 49.0, 28.0, 20.5, 17.0, 15.5, 12.0];

    println!("Observed:  {:?}", observed);
    println!("Simulated: {:?}", simulated);
    println!();

    match EfficiencyMetrics::compute(&observed, &simulated) {
        Ok(m) => {
            println!("MAE:  {:.4}", m.mae);
            println!("MSE:  {:.4}", m.mse);
            println!("RMSE: {:.4}", m.rmse);
            println!("NSE:  {:.4}", m.nse);
            println!("NNSE: {:.4}", m.nnse);
            println!("KGE:  {:.4}", m.kge);
        }
        Err(e) => println!("Error computing metrics: {e}"),
    }

    println!("\n--- Variants ---\n");

    let config = EfficiencyConfig::default();
    let report = |name: &str, value: hydrotools::Result<f64>| match value {
        Ok(v) => println!("{name:<32} {v:.4}"),
        Err(e) => println!("{name:<32} error: {e}"),
    };

    report(
        "log NSE",
        nash_sutcliffe_efficiency(&observed, &simulated, &config.with_log()),
    );
    report(
        "coefficient of persistence",
        coefficient_of_persistence(&observed, &simulated, 1, &config),
    );
    report(
        "coefficient of extrapolation",
        coefficient_of_extrapolation(&observed, &simulated, &config),
    );
    report(
        "RMSE",
        root_mean_squared_error(&observed, &simulated),
    );

    if let Ok(c) = kling_gupta_components(&observed, &simulated) {
        println!("\nKGE components: r = {:.4}, alpha = {:.4}, beta = {:.4}", c.r, c.alpha, c.beta);
    }

    // Shorter simulation is reported rather than truncated
    report(
        "NSE (mismatched lengths)",
        nash_sutcliffe_efficiency(&observed, &simulated[..5], &config),
    );
}
