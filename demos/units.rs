//! Unit Conversion Example
//!
//! Converts streamflow between cubic feet and cubic meters per second.
//!
//! Run with: cargo run --example units

use std::sync::Arc;

use hydrotools::prelude::*;

fn main() {
    println!("=== Unit Conversion Example ===\n");

    let handler = UnitHandler::new(Arc::new(UnitRegistry::new()));

    match handler.conversion_factor("ft^3/s", "m^3/s") {
        Ok(factor) => println!("1 ft^3/s = {factor} m^3/s"),
        Err(e) => println!("Error: {e}"),
    }

    let flows_cfs = [120.0, 450.0, 3200.0];
    match handler.convert_values(&flows_cfs, "cfs", "cms") {
        Ok(flows_cms) => println!("{flows_cfs:?} cfs = {flows_cms:.3?} cms"),
        Err(e) => println!("Error: {e}"),
    }

    match handler.conversion_factor("m^3/s", "ft") {
        Ok(factor) => println!("unexpected factor {factor}"),
        Err(e) => println!("Expected failure: {e}"),
    }
}
